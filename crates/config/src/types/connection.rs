//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (region, endpoint type, URLs, timeouts, retries).
//! - Define the main `Config` structure combining connection and auth.
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).

use crate::types::auth::AuthConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Which network path reaches the Cloud Logs instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointType {
    #[default]
    Public,
    Private,
}

impl EndpointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointType::Public => "public",
            EndpointType::Private => "private",
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(EndpointType::Public),
            "private" => Ok(EndpointType::Private),
            other => Err(format!("must be 'public' or 'private', got '{other}'")),
        }
    }
}

/// Connection configuration for Cloud Logs instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Region used when a resource does not name one (e.g. `us-south`).
    pub region: String,
    /// Default endpoint type for instance URLs.
    #[serde(default)]
    pub endpoint_type: EndpointType,
    /// Fixed service URL; replaces the per-instance URL when set.
    #[serde(default)]
    pub service_url: Option<String>,
    /// IAM endpoint used for API key exchange.
    pub iam_url: String,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for failed requests
    pub max_retries: usize,
    /// Refresh the IAM token this many seconds before it expires.
    pub token_expiry_buffer_seconds: u64,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub auth: AuthConfig,
}
