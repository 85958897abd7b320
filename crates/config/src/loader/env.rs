//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse environment variables for Cloud Logs configuration.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading from profile files (see profile.rs).
//! - Building the final Config (see builder.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.
//! - For aliased variables the IBMCLOUD_* name wins over the IC_* name.

use secrecy::SecretString;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::MAX_MAX_RETRIES;
use crate::types::EndpointType;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// First non-empty value among `keys`.
fn first_env_var(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| env_var_or_none(key))
}

fn parse_number<T: std::str::FromStr>(
    var: &str,
    raw: &str,
    message: &str,
) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        message: message.to_string(),
    })
}

/// Apply environment variable configuration to the loader.
///
/// Environment variables take precedence over profile settings.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(key) = first_env_var(&["IBMCLOUD_API_KEY", "IC_API_KEY"]) {
        loader.set_api_key(Some(SecretString::new(key.into())));
    }
    if let Some(token) = env_var_or_none("LOGS_BEARER_TOKEN") {
        loader.set_bearer_token(Some(SecretString::new(token.into())));
    }
    if let Some(region) = first_env_var(&["IBMCLOUD_REGION", "IC_REGION"]) {
        loader.set_region(Some(region));
    }
    if let Some(kind) = env_var_or_none("LOGS_ENDPOINT_TYPE") {
        let endpoint_type: EndpointType =
            kind.parse().map_err(|message| ConfigError::InvalidValue {
                var: "LOGS_ENDPOINT_TYPE".to_string(),
                message,
            })?;
        loader.set_endpoint_type(Some(endpoint_type));
    }
    if let Some(url) = env_var_or_none("LOGS_SERVICE_URL") {
        loader.set_service_url(Some(url));
    }
    if let Some(url) = env_var_or_none("IBMCLOUD_IAM_URL") {
        loader.set_iam_url(Some(url));
    }
    if let Some(timeout) = env_var_or_none("LOGS_TIMEOUT") {
        let secs: u64 = parse_number("LOGS_TIMEOUT", &timeout, "must be a number")?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = env_var_or_none("LOGS_MAX_RETRIES") {
        let value: usize = parse_number(
            "LOGS_MAX_RETRIES",
            &retries,
            "must be a non-negative integer",
        )?;
        if value > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!("must be between 0 and {} (got {})", MAX_MAX_RETRIES, value),
            });
        }
        loader.set_max_retries(Some(value));
    }
    if let Some(buffer) = env_var_or_none("LOGS_TOKEN_EXPIRY_BUFFER") {
        loader.set_token_expiry_buffer_seconds(Some(parse_number(
            "LOGS_TOKEN_EXPIRY_BUFFER",
            &buffer,
            "must be a number",
        )?));
    }

    // Config path and profile name from environment (only if not already set via CLI)
    if loader.config_path().is_none()
        && let Some(config_path) = env_var_or_none("LOGS_CONFIG_PATH")
    {
        loader.set_config_path(Some(std::path::PathBuf::from(config_path)));
    }
    if loader.profile_name().is_none()
        && let Some(profile) = env_var_or_none("LOGS_PROFILE")
    {
        loader.set_profile_name(Some(profile));
    }

    Ok(())
}
