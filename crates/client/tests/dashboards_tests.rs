//! Dashboard endpoint tests.
//!
//! # Invariants
//! - Requests carry `Authorization: Bearer <token>`
//! - HTTP 404 maps to `ClientError::NotFound`
//! - Undecodable bodies map to `ClientError::InvalidResponse`

mod common;

use cloudlogs_client::models::{
    AutoRefresh, Dashboard, Empty, FolderLocation, GaugeQuery, Layout, TimeFrame, WidgetDefinition,
};
use cloudlogs_client::ClientError;
use common::*;
use wiremock::matchers::{body_json, header, method, path};

fn new_dashboard() -> Dashboard {
    Dashboard {
        id: None,
        href: None,
        name: "Checkout service".to_string(),
        description: None,
        layout: Layout::default(),
        variables: vec![],
        filters: vec![],
        annotations: vec![],
        time_frame: Some(TimeFrame::RelativeTimeFrame("900s".to_string())),
        folder: None,
        auto_refresh: Some(AutoRefresh::Off(Empty {})),
    }
}

#[tokio::test]
async fn test_create_dashboard_posts_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/dashboards"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({
            "name": "Checkout service",
            "layout": {},
            "relative_time_frame": "900s",
            "false": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "AbC123xyz0AbC123xyz0A",
            "name": "Checkout service",
            "layout": {},
            "relative_time_frame": "900s",
            "false": {}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = endpoints::create_dashboard(
        &Client::new(),
        &mock_server.uri(),
        "test-token",
        &new_dashboard(),
        0,
        None,
    )
    .await
    .unwrap();

    assert_eq!(created.id.as_deref(), Some("AbC123xyz0AbC123xyz0A"));
    assert_eq!(created.auto_refresh, Some(AutoRefresh::Off(Empty {})));
}

#[tokio::test]
async fn test_get_dashboard_json_keeps_unknown_variants() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/AbC123xyz0AbC123xyz0A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "AbC123xyz0AbC123xyz0A",
            "name": "Checkout service",
            "layout": {},
            "ten_minutes": {},
            "folder_uri": { "value": "x" }
        })))
        .mount(&mock_server)
        .await;

    let body = endpoints::get_dashboard_json(
        &Client::new(),
        &mock_server.uri(),
        "test-token",
        "AbC123xyz0AbC123xyz0A",
        0,
        None,
    )
    .await
    .unwrap();

    assert_eq!(body.get("ten_minutes"), Some(&serde_json::json!({})));
    assert_eq!(body.get("folder_uri"), Some(&serde_json::json!({ "value": "x" })));
}

#[tokio::test]
async fn test_get_dashboard_parses_fixture() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("dashboards/get_dashboard.json");

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/AbC123xyz0AbC123xyz0A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .mount(&mock_server)
        .await;

    let dashboard = endpoints::get_dashboard(
        &Client::new(),
        &mock_server.uri(),
        "test-token",
        "AbC123xyz0AbC123xyz0A",
        0,
        None,
    )
    .await
    .unwrap();

    assert_eq!(dashboard.name, "Checkout service");
    assert_eq!(dashboard.layout.sections.len(), 1);
    let widgets = &dashboard.layout.sections[0].rows[0].widgets;
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].definition.kind(), "line_chart");
    assert_eq!(widgets[0].created_at.as_deref(), Some("2024-05-01T10:00:00.000Z"));

    let WidgetDefinition::Gauge(gauge) = &widgets[1].definition else {
        panic!("expected gauge widget");
    };
    assert_eq!(gauge.min, 0.0);
    assert!(matches!(gauge.query, GaugeQuery::Dataprime(_)));

    assert!(matches!(
        dashboard.folder,
        Some(FolderLocation::FolderPath(ref p)) if p.segments == ["payments"]
    ));
    assert_eq!(dashboard.auto_refresh, Some(AutoRefresh::TwoMinutes(Empty {})));
}

#[tokio::test]
async fn test_get_dashboard_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(api_error_body("not_found", "dashboard not found")),
        )
        .mount(&mock_server)
        .await;

    let err = endpoints::get_dashboard(
        &Client::new(),
        &mock_server.uri(),
        "test-token",
        "missing",
        3,
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::NotFound(ref msg) if msg.contains("dashboard not found")));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_get_dashboard_encodes_id() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("dashboards/get_dashboard.json");

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = endpoints::get_dashboard(
        &Client::new(),
        &mock_server.uri(),
        "test-token",
        "a/b",
        0,
        None,
    )
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_invalid_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/dash-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"unexpected": true})))
        .mount(&mock_server)
        .await;

    let err = endpoints::get_dashboard(
        &Client::new(),
        &mock_server.uri(),
        "test-token",
        "dash-1",
        0,
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::InvalidResponse(ref msg) if msg.contains("dashboard")));
}

#[tokio::test]
async fn test_replace_dashboard_puts_payload() {
    let mock_server = MockServer::start().await;
    let mut dashboard = new_dashboard();
    dashboard.name = "Renamed".to_string();

    Mock::given(method("PUT"))
        .and(path("/v1/dashboards/dash-1"))
        .and(body_json(serde_json::to_value(&dashboard).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "dash-1",
            "name": "Renamed",
            "layout": {}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let replaced = endpoints::replace_dashboard(
        &Client::new(),
        &mock_server.uri(),
        "test-token",
        "dash-1",
        &dashboard,
        0,
        None,
    )
    .await
    .unwrap();

    assert_eq!(replaced.name, "Renamed");
    assert!(replaced.time_frame.is_none());
}

#[tokio::test]
async fn test_delete_dashboard() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/dashboards/dash-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = endpoints::delete_dashboard(
        &Client::new(),
        &mock_server.uri(),
        "test-token",
        "dash-1",
        0,
        None,
    )
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_api_error_carries_trace() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/dashboards"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(api_error_body("bad_request", "name is required")),
        )
        .mount(&mock_server)
        .await;

    let err = endpoints::create_dashboard(
        &Client::new(),
        &mock_server.uri(),
        "test-token",
        &new_dashboard(),
        3,
        None,
    )
    .await
    .unwrap_err();

    match err {
        ClientError::ApiError {
            status,
            message,
            request_id,
            ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "bad_request: name is required");
            assert_eq!(request_id.as_deref(), Some("3a7c2f1e-trace"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}
