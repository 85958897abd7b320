//! Property-based tests for configuration serialization and loading.
//!
//! Test coverage:
//! - ConnectionConfig: roundtrip serialization with all fields
//! - AuthConfig: strategy type and secret preserved
//! - ConfigLoader: any well-formed region/URL/timeout combination builds

use proptest::prelude::*;
use secrecy::{ExposeSecret, SecretString};

use cloudlogs_config::{
    AuthConfig, AuthStrategy, ConfigLoader, ConnectionConfig, EndpointType,
    constants::{MAX_MAX_RETRIES, MAX_TIMEOUT_SECS},
};
use std::time::Duration;

fn region_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("us-south".to_string()),
        Just("eu-de".to_string()),
        Just("jp-tok".to_string()),
        "[a-z]{2}-[a-z]{2,6}".prop_map(String::from),
    ]
}

fn endpoint_type_strategy() -> impl Strategy<Value = EndpointType> {
    prop_oneof![Just(EndpointType::Public), Just(EndpointType::Private)]
}

fn service_url_strategy() -> impl Strategy<Value = String> {
    (
        "[a-f0-9]{8}",
        prop_oneof![Just("api"), Just("api.private")],
        region_strategy(),
    )
        .prop_map(|(instance, kind, region)| {
            format!("https://{instance}.{kind}.{region}.logs.cloud.ibm.com")
        })
}

fn api_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_\\-]{16,64}"
}

fn connection_config_strategy() -> impl Strategy<Value = ConnectionConfig> {
    (
        region_strategy(),
        endpoint_type_strategy(),
        proptest::option::of(service_url_strategy()),
        1u64..=MAX_TIMEOUT_SECS,
        0usize..=MAX_MAX_RETRIES,
        0u64..=600,
    )
        .prop_map(
            |(region, endpoint_type, service_url, timeout, max_retries, buffer)| ConnectionConfig {
                region,
                endpoint_type,
                service_url,
                iam_url: "https://iam.cloud.ibm.com".to_string(),
                timeout: Duration::from_secs(timeout),
                max_retries,
                token_expiry_buffer_seconds: buffer,
            },
        )
}

proptest! {
    #[test]
    fn connection_config_roundtrip(config in connection_config_strategy()) {
        let json = serde_json::to_string(&config).unwrap();
        let back: ConnectionConfig = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(back.region, config.region);
        prop_assert_eq!(back.endpoint_type, config.endpoint_type);
        prop_assert_eq!(back.service_url, config.service_url);
        prop_assert_eq!(back.timeout, config.timeout);
        prop_assert_eq!(back.max_retries, config.max_retries);
        prop_assert_eq!(back.token_expiry_buffer_seconds, config.token_expiry_buffer_seconds);
    }

    #[test]
    fn auth_config_roundtrip_preserves_api_key(key in api_key_strategy()) {
        let auth = AuthConfig {
            strategy: AuthStrategy::IamApiKey { api_key: SecretString::new(key.clone().into()) },
        };
        let json = serde_json::to_string(&auth).unwrap();
        let back: AuthConfig = serde_json::from_str(&json).unwrap();

        match back.strategy {
            AuthStrategy::IamApiKey { api_key } => prop_assert_eq!(api_key.expose_secret(), key.as_str()),
            other => prop_assert!(false, "unexpected strategy {:?}", other),
        }
    }

    #[test]
    fn loader_builds_any_well_formed_input(
        region in region_strategy(),
        endpoint_type in endpoint_type_strategy(),
        url in service_url_strategy(),
        timeout in 1u64..=MAX_TIMEOUT_SECS,
        key in api_key_strategy(),
    ) {
        let config = ConfigLoader::new()
            .with_api_key(key)
            .with_region(region.clone())
            .with_endpoint_type(endpoint_type)
            .with_service_url(format!("{url}/"))
            .with_timeout(Duration::from_secs(timeout))
            .build()
            .unwrap();

        prop_assert_eq!(config.connection.region, region);
        prop_assert_eq!(config.connection.service_url, Some(url));
        prop_assert_eq!(config.connection.endpoint_type, endpoint_type);
    }
}
