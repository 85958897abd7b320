//! Transient failure retry tests.
//!
//! # Invariants
//! - 429, 502, 503 and 504 are retried with exponential backoff (1s, 2s, 4s)
//! - `Retry-After` (seconds) replaces the computed backoff, capped at 60s
//! - 500 and other statuses fail immediately
//! - Exhaustion returns `MaxRetriesExceeded` carrying the last failure

mod common;

use cloudlogs_client::ClientError;
use common::*;
use std::time::Duration;
use tokio::time::Instant;
use wiremock::matchers::{method, path};

async fn mount_then_ok(server: &MockServer, status: u16, times: u64, retry_after: Option<&str>) {
    let mut failing = ResponseTemplate::new(status).set_body_json(api_error_body("transient", "try again"));
    if let Some(value) = retry_after {
        failing = failing.insert_header("Retry-After", value);
    }
    Mock::given(method("GET"))
        .and(path("/v1/dashboards/dash-1"))
        .respond_with(failing)
        .up_to_n_times(times)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/dash-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("dashboards/get_dashboard.json")))
        .mount(server)
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_retry_on_503_with_backoff() {
    let mock_server = MockServer::start().await;
    mount_then_ok(&mock_server, 503, 2, None).await;

    let client = Client::new();
    let server_uri = mock_server.uri();
    let result_handle = tokio::spawn(async move {
        endpoints::get_dashboard(&client, &server_uri, "test-token", "dash-1", 3, None).await
    });

    assert_pending(&result_handle, "first 503 retry should wait for backoff").await;
    advance_and_yield(Duration::from_secs(1)).await;
    assert_pending(&result_handle, "second 503 retry should wait for backoff").await;
    advance_and_yield(Duration::from_secs(2)).await;
    let result = result_handle.await.expect("get dashboard task");

    assert!(result.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_retry_on_502_and_504() {
    for status in [502, 504] {
        let mock_server = MockServer::start().await;
        mount_then_ok(&mock_server, status, 1, None).await;

        let started = Instant::now();
        let result =
            endpoints::get_dashboard(&Client::new(), &mock_server.uri(), "test-token", "dash-1", 3, None)
                .await;

        assert!(result.is_ok(), "status {status} should be retried");
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}

#[tokio::test(start_paused = true)]
async fn test_retry_after_header_is_honored() {
    let mock_server = MockServer::start().await;
    mount_then_ok(&mock_server, 429, 1, Some("7")).await;

    let started = Instant::now();
    let result =
        endpoints::get_dashboard(&Client::new(), &mock_server.uri(), "test-token", "dash-1", 3, None)
            .await;

    assert!(result.is_ok());
    assert!(started.elapsed() >= Duration::from_secs(7));
}

#[tokio::test(start_paused = true)]
async fn test_retry_after_is_capped() {
    let mock_server = MockServer::start().await;
    mount_then_ok(&mock_server, 429, 1, Some("3600")).await;

    let started = Instant::now();
    let result =
        endpoints::get_dashboard(&Client::new(), &mock_server.uri(), "test-token", "dash-1", 3, None)
            .await;

    assert!(result.is_ok());
    assert!(started.elapsed() >= Duration::from_secs(60));
    assert!(started.elapsed() < Duration::from_secs(3600));
}

#[tokio::test]
async fn test_500_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/dash-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(api_error_body("internal", "boom")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = endpoints::get_dashboard(&Client::new(), &mock_server.uri(), "test-token", "dash-1", 3, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ApiError { status: 500, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_retries_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/dash-1"))
        .respond_with(ResponseTemplate::new(503).set_body_json(api_error_body("unavailable", "down")))
        .expect(3)
        .mount(&mock_server)
        .await;

    let err = endpoints::get_dashboard(&Client::new(), &mock_server.uri(), "test-token", "dash-1", 2, None)
        .await
        .unwrap_err();

    match &err {
        ClientError::MaxRetriesExceeded(attempts, inner) => {
            assert_eq!(*attempts, 3);
            assert!(matches!(inner.as_ref(), ClientError::ApiError { status: 503, .. }));
        }
        other => panic!("expected MaxRetriesExceeded, got {other:?}"),
    }
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_zero_retries_sends_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/dash-1"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = endpoints::get_dashboard(&Client::new(), &mock_server.uri(), "test-token", "dash-1", 0, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MaxRetriesExceeded(1, _)));
    assert_eq!(err.status(), Some(429));
}
