//! Error envelope shared by every Cloud Logs endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single error entry from an API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub more_info: Option<String>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
    /// Server-side trace id for support requests.
    #[serde(default)]
    pub trace: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            match &error.code {
                Some(code) => write!(f, "{code}: {}", error.message)?,
                None => write!(f, "{}", error.message)?,
            }
        }
        Ok(())
    }
}
