//! Centralized constants for the Cloud Logs dashboard workspace.
//!
//! Default values shared by the config loader, the API client and the CLI.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for failed requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Maximum allowed retry count.
pub const MAX_MAX_RETRIES: usize = 10;

/// Seconds before IAM token expiry at which the token is refreshed.
pub const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 60;

// =============================================================================
// IBM Cloud Endpoints
// =============================================================================

/// Region used when neither the resource nor the provider names one.
pub const DEFAULT_REGION: &str = "us-south";

/// Public IAM endpoint used for API key exchange.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Domain under which Cloud Logs instance endpoints live.
pub const LOGS_API_DOMAIN: &str = "logs.cloud.ibm.com";

/// Service name used for keyring storage and the config directory.
pub const APP_NAME: &str = "cloudlogs-dashboard";
