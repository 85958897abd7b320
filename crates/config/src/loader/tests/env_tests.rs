//! Environment variable tests for the configuration loader builder.

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::{AuthStrategy, EndpointType};
use secrecy::ExposeSecret;
use serial_test::serial;
use std::time::Duration;

use super::profile_tests::create_test_config_file;
use super::{LOADER_ENV_VARS, env_lock};
use tempfile::TempDir;

fn cleared_with<'a>(vars: &[(&'a str, &'a str)]) -> Vec<(&'a str, Option<&'a str>)> {
    let mut all: Vec<(&str, Option<&str>)> =
        LOADER_ENV_VARS.iter().map(|name| (*name, None)).collect();
    for (name, value) in vars {
        all.retain(|(n, _)| n != name);
        all.push((name, Some(value)));
    }
    all
}

#[test]
#[serial]
fn test_env_populates_connection() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        cleared_with(&[
            ("IBMCLOUD_API_KEY", "env-key"),
            ("IBMCLOUD_REGION", "eu-de"),
            ("LOGS_ENDPOINT_TYPE", "private"),
            ("LOGS_TIMEOUT", "12"),
            ("LOGS_MAX_RETRIES", "1"),
            ("LOGS_TOKEN_EXPIRY_BUFFER", "30"),
        ]),
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.connection.region, "eu-de");
            assert_eq!(config.connection.endpoint_type, EndpointType::Private);
            assert_eq!(config.connection.timeout, Duration::from_secs(12));
            assert_eq!(config.connection.max_retries, 1);
            assert_eq!(config.connection.token_expiry_buffer_seconds, 30);
            match config.auth.strategy {
                AuthStrategy::IamApiKey { api_key } => {
                    assert_eq!(api_key.expose_secret(), "env-key")
                }
                other => panic!("Expected IamApiKey, got {other:?}"),
            }
        },
    );
}

#[test]
#[serial]
fn test_ic_api_key_alias() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(cleared_with(&[("IC_API_KEY", "alias-key")]), || {
        let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
        assert!(matches!(
            config.auth.strategy,
            AuthStrategy::IamApiKey { .. }
        ));
    });
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        cleared_with(&[("IBMCLOUD_API_KEY", ""), ("LOGS_BEARER_TOKEN", "   ")]),
        || {
            let result = ConfigLoader::new().from_env().unwrap().build();
            assert!(matches!(result, Err(ConfigError::MissingAuth)));
        },
    );
}

#[test]
#[serial]
fn test_env_overrides_profile() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    temp_env::with_vars(cleared_with(&[("IBMCLOUD_REGION", "jp-tok")]), || {
        let config = ConfigLoader::new()
            .with_profile_name("dev".to_string())
            .with_config_path(config_path.clone())
            .from_profile()
            .unwrap()
            .from_env()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.connection.region, "jp-tok");
        // Values not set in env still come from the profile
        assert_eq!(config.connection.max_retries, 5);
    });
}

#[test]
#[serial]
fn test_config_path_and_profile_from_env() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());
    let path_str = config_path.to_string_lossy().to_string();

    temp_env::with_vars(
        cleared_with(&[
            ("LOGS_CONFIG_PATH", path_str.as_str()),
            ("LOGS_PROFILE", "prod"),
        ]),
        || {
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .from_profile()
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(config.connection.region, "eu-de");
            assert!(matches!(
                config.auth.strategy,
                AuthStrategy::BearerToken { .. }
            ));
        },
    );
}

#[test]
#[serial]
fn test_builder_profile_name_not_replaced_by_env() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config_file(temp_dir.path());

    temp_env::with_vars(cleared_with(&[("LOGS_PROFILE", "prod")]), || {
        let config = ConfigLoader::new()
            .with_profile_name("dev".to_string())
            .with_config_path(config_path.clone())
            .from_env()
            .unwrap()
            .from_profile()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.connection.region, "us-east");
    });
}
