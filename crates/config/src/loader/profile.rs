//! Profile file loading for configuration.
//!
//! Responsibilities:
//! - Load configuration from JSON profile files.
//! - Apply profile settings to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Environment variable parsing (see env.rs).
//! - Building the final Config (see builder.rs).
//!
//! Invariants:
//! - Profile settings are applied before environment variables (env vars take precedence).
//! - Missing profiles are recorded for later error handling in build().

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::persistence::{default_config_path, read_config_file};
use crate::types::ProfileConfig;

/// Apply profile configuration from a profile file to the loader.
///
/// If the profile is not found, this records the missing profile name
/// for later error handling in `build()`.
pub fn apply_profile(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let profile_name = match loader.profile_name() {
        Some(name) => name.clone(),
        None => return Ok(()),
    };

    let config_path = if let Some(path) = loader.config_path() {
        path.clone()
    } else {
        default_config_path().map_err(|e| ConfigError::ConfigDirUnavailable(e.to_string()))?
    };

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "config file not found");
        loader.set_profile_missing(Some(profile_name));
        return Ok(());
    }

    let file = read_config_file(&config_path)?;
    let Some(profile) = file.profiles.get(&profile_name) else {
        loader.set_profile_missing(Some(profile_name));
        return Ok(());
    };

    apply_profile_config(loader, profile)
}

/// Apply profile configuration values to the loader.
fn apply_profile_config(
    loader: &mut ConfigLoader,
    profile: &ProfileConfig,
) -> Result<(), ConfigError> {
    if let Some(key) = &profile.api_key {
        loader.set_api_key(Some(key.resolve()?));
    }
    if let Some(token) = &profile.bearer_token {
        loader.set_bearer_token(Some(token.resolve()?));
    }
    if let Some(region) = &profile.region {
        loader.set_region(Some(region.clone()));
    }
    if let Some(kind) = profile.endpoint_type {
        loader.set_endpoint_type(Some(kind));
    }
    if let Some(url) = &profile.service_url {
        loader.set_service_url(Some(url.clone()));
    }
    if let Some(url) = &profile.iam_url {
        loader.set_iam_url(Some(url.clone()));
    }
    if let Some(secs) = profile.timeout_seconds {
        loader.set_timeout(Some(std::time::Duration::from_secs(secs)));
    }
    if let Some(retries) = profile.max_retries {
        loader.set_max_retries(Some(retries));
    }
    if let Some(buffer) = profile.token_expiry_buffer_seconds {
        loader.set_token_expiry_buffer_seconds(Some(buffer));
    }
    Ok(())
}
