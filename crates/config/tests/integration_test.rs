//! Integration tests for configuration loading through the public API.

use cloudlogs_config::{AuthStrategy, ConfigError, ConfigLoader, env_var_or_none};
use std::io::Write;

#[test]
fn test_config_loader_cli_overrides() {
    let config = ConfigLoader::new()
        .with_bearer_token("cli-token".to_string())
        .with_region("ca-tor".to_string())
        .build()
        .expect("should build with CLI overrides");

    assert_eq!(config.connection.region, "ca-tor");
    assert!(matches!(
        config.auth.strategy,
        AuthStrategy::BearerToken { .. }
    ));
}

#[test]
fn test_env_var_or_none_exported() {
    let _result: Option<String> = env_var_or_none("LOGS_SERVICE_URL");
}

#[test]
fn test_profile_then_builder_chain() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"{{"profiles": {{"staging": {{"api_key": "k", "region": "eu-es", "max_retries": 2}}}}}}"#
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_profile_name("staging".to_string())
        .with_config_path(path)
        .from_profile()
        .unwrap()
        .with_max_retries(4)
        .build()
        .unwrap();

    assert_eq!(config.connection.region, "eu-es");
    assert_eq!(config.connection.max_retries, 4);
}

#[test]
fn test_missing_auth_message_names_variables() {
    let err = ConfigLoader::new().build().unwrap_err();
    assert!(matches!(err, ConfigError::MissingAuth));
    assert!(err.to_string().contains("IBMCLOUD_API_KEY"));
}
