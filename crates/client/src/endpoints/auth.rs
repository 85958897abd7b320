//! IAM authentication endpoint.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::{decode_json, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::IamTokenResponse;

const API_KEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Exchange an IBM Cloud API key for an IAM access token.
///
/// IAM rejects bad keys with 400 or 401; both are reported as
/// [`ClientError::AuthFailed`].
pub async fn request_iam_token(
    client: &Client,
    iam_url: &str,
    api_key: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<IamTokenResponse> {
    debug!("Requesting IAM access token");

    let url = format!("{}/identity/token", iam_url);
    let builder = client
        .post(&url)
        .header("Accept", "application/json")
        .form(&[("grant_type", API_KEY_GRANT_TYPE), ("apikey", api_key)]);

    let response =
        match send_request_with_retry(builder, max_retries, "/identity/token", "POST", metrics)
            .await
        {
            Ok(response) => response,
            Err(ClientError::ApiError {
                status, message, ..
            }) if status == 400 || status == 401 => {
                return Err(ClientError::AuthFailed(message));
            }
            Err(e) => return Err(e),
        };

    decode_json(response, "IAM token response").await
}
