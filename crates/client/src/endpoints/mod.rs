//! REST API endpoint implementations.
//!
//! Each function performs exactly one logical API call against a base URL
//! with an already-resolved bearer token. Token lifecycle lives in
//! [`crate::client`].

mod auth;
mod dashboards;
mod request;
pub mod url_encoding;

pub use auth::request_iam_token;
pub use dashboards::{
    create_dashboard, create_dashboard_json, delete_dashboard, get_dashboard, get_dashboard_json,
    replace_dashboard,
};
pub use request::send_request_with_retry;

use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

/// Read a response body and decode it as `T`.
///
/// Decode failures become [`ClientError::InvalidResponse`] naming the model.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
    model: &'static str,
) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::InvalidResponse(format!("failed to decode {model}: {e}")))
}
