//! Common test utilities for resource integration tests.

use cloudlogs_client::{AuthStrategy, LogsClient};
use cloudlogs_provider::{DashboardResource, FlatMap};
use secrecy::SecretString;
use serde_json::Value;

#[allow(unused_imports)]
pub use cloudlogs_client::testing::load_fixture;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const INSTANCE_ID: &str = "0a1b2c3d-4e5f-6789-abcd-ef0123456789";
#[allow(dead_code)]
pub const DASHBOARD_ID: &str = "AbC123xyz0AbC123xyz0A";

/// Unwrap a JSON object literal.
pub fn object(value: Value) -> FlatMap {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[allow(dead_code)]
pub fn resource() -> DashboardResource {
    DashboardResource::new().expect("dashboard schema builds")
}

/// Client pinned to the mock server with a static bearer token.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> LogsClient {
    LogsClient::builder()
        .auth_strategy(AuthStrategy::BearerToken {
            token: SecretString::new("test-token".to_string().into()),
        })
        .service_url(server.uri())
        .region("us-south")
        .max_retries(0)
        .build()
        .expect("client builds")
}
