//! IAM token exchange and renewal tests.
//!
//! # Invariants
//! - API key auth exchanges the key once and reuses the token until it nears expiry
//! - A 401/403 from Cloud Logs clears the cached token and retries once
//! - Bearer token auth never calls IAM

mod common;

use cloudlogs_client::{AuthStrategy, ClientError, LogsClient};
use common::*;
use secrecy::SecretString;
use wiremock::matchers::{body_string_contains, header, method, path};

fn api_key() -> AuthStrategy {
    AuthStrategy::IamApiKey {
        api_key: SecretString::new("my-api-key".to_string().into()),
    }
}

async fn mount_iam(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(body_string_contains("grant_type=urn%3Aibm%3Aparams%3Aoauth%3Agrant-type%3Aapikey"))
        .and(body_string_contains("apikey=my-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("auth/iam_token.json")))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_request_iam_token() {
    let mock_server = MockServer::start().await;
    mount_iam(&mock_server, 1).await;

    let token = endpoints::request_iam_token(&Client::new(), &mock_server.uri(), "my-api-key", 0, None)
        .await
        .unwrap();

    assert!(token.access_token.starts_with("eyJ"));
    assert_eq!(token.expires_in, Some(3600));
}

#[tokio::test]
async fn test_request_iam_token_rejected_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errorCode": "BXNIM0415E",
            "errorMessage": "Provided API key could not be found."
        })))
        .mount(&mock_server)
        .await;

    let err = endpoints::request_iam_token(&Client::new(), &mock_server.uri(), "bad", 0, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::AuthFailed(ref msg) if msg.contains("BXNIM0415E")));
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_client_reuses_iam_token() {
    let mock_server = MockServer::start().await;
    mount_iam(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/AbC123xyz0AbC123xyz0A"))
        .and(header(
            "authorization",
            "Bearer eyJraWQiOiIyMDI0MDEwMSIsImFsZyI6IlJTMjU2In0.test",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("dashboards/get_dashboard.json")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut client = LogsClient::builder()
        .auth_strategy(api_key())
        .service_url(mock_server.uri())
        .iam_url(mock_server.uri())
        .build()
        .unwrap();

    client.get_dashboard("AbC123xyz0AbC123xyz0A").await.unwrap();
    client.get_dashboard("AbC123xyz0AbC123xyz0A").await.unwrap();
}

#[tokio::test]
async fn test_client_reauthenticates_on_401() {
    let mock_server = MockServer::start().await;
    mount_iam(&mock_server, 2).await;

    Mock::given(method("DELETE"))
        .and(path("/v1/dashboards/dash-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(api_error_body("unauthorized", "token expired")))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/dashboards/dash-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = LogsClient::builder()
        .auth_strategy(api_key())
        .service_url(mock_server.uri())
        .iam_url(mock_server.uri())
        .build()
        .unwrap();

    assert!(client.delete_dashboard("dash-1").await.is_ok());
}

#[tokio::test]
async fn test_bearer_token_is_not_renewed() {
    let mock_server = MockServer::start().await;
    mount_iam(&mock_server, 0).await;

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/dash-1"))
        .and(header("authorization", "Bearer static-token"))
        .respond_with(ResponseTemplate::new(403).set_body_json(api_error_body("forbidden", "no access")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = LogsClient::builder()
        .auth_strategy(AuthStrategy::BearerToken {
            token: SecretString::new("static-token".to_string().into()),
        })
        .service_url(mock_server.uri())
        .iam_url(mock_server.uri())
        .build()
        .unwrap();

    let err = client.get_dashboard("dash-1").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_client_without_instance_fails_before_any_request() {
    let mut client = LogsClient::builder().auth_strategy(api_key()).build().unwrap();

    let err = client.get_dashboard("dash-1").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidUrl(_)));
}
