//! IAM token exchange models.

use serde::Deserialize;
use std::fmt;

/// Response from the IAM `identity/token` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IamTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Absolute expiry as a unix timestamp.
    #[serde(default)]
    pub expiration: Option<u64>,
}

/// Error body returned by IAM.
#[derive(Debug, Clone, Deserialize)]
pub struct IamErrorResponse {
    #[serde(rename = "errorCode")]
    pub error_code: String,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl fmt::Display for IamErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_code, self.error_message)
    }
}
