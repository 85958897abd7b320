//! Profile configuration types.
//!
//! Invariants:
//! - All fields are optional to allow partial profile definitions.
//! - Secret fields use `SecureValue` for flexible secret storage.

use crate::types::auth::SecureValue;
use crate::types::connection::EndpointType;
use serde::{Deserialize, Serialize};

/// Named connection profile stored in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// IBM Cloud API key
    pub api_key: Option<SecureValue>,
    /// Pre-issued bearer token
    pub bearer_token: Option<SecureValue>,
    pub region: Option<String>,
    pub endpoint_type: Option<EndpointType>,
    pub service_url: Option<String>,
    pub iam_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    pub max_retries: Option<usize>,
    pub token_expiry_buffer_seconds: Option<u64>,
}
