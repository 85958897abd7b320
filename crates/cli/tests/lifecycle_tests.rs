//! apply / read / import / delete against a mock Cloud Logs API, and the
//! structured exit codes scripts rely on.

mod common;

use common::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dashboard_path() -> String {
    format!("/v1/dashboards/{DASHBOARD_ID}")
}

fn state_id() -> String {
    format!("us-south/{INSTANCE_ID}/{DASHBOARD_ID}")
}

fn read_state(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn write_state(path: &std::path::Path, name: &str) {
    let state = json!({
        "id": state_id(),
        "attributes": {
            "instance_id": INSTANCE_ID,
            "region": "us-south",
            "dashboard_id": DASHBOARD_ID,
            "name": name,
            "layout": [{}],
            "relative_time_frame": "900s",
        },
    });
    std::fs::write(path, state.to_string()).unwrap();
}

async fn mount_get(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(dashboard_path()))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_apply_creates_dashboard_and_writes_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/dashboards"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote("Checkout service")))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(&server, 200, remote("Checkout service")).await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("dashboard.json");
    let state = dir.path().join("dashboard.state.json");
    write_config(&file, "Checkout service");

    dashboard_cmd_with_service_url(&server.uri())
        .arg("apply")
        .arg(&file)
        .arg("--state")
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains(state_id()));

    let saved = read_state(&state);
    assert_eq!(saved["id"], state_id());
    assert_eq!(saved["attributes"]["dashboard_id"], DASHBOARD_ID);
    assert_eq!(saved["attributes"]["region"], "us-south");
}

#[tokio::test]
async fn test_apply_records_created_dashboard_when_read_back_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/dashboards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote("Checkout service")))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(
        &server,
        503,
        json!({ "errors": [{ "code": "unavailable", "message": "try again" }] }),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("dashboard.json");
    let state = dir.path().join("dashboard.state.json");
    write_config(&file, "Checkout service");

    dashboard_cmd_with_service_url(&server.uri())
        .arg("apply")
        .arg(&file)
        .arg("--state")
        .arg(&state)
        .assert()
        .code(8)
        .stderr(predicate::str::contains("could not be read back"));

    let saved = read_state(&state);
    assert_eq!(saved["id"], state_id());
    assert_eq!(saved["attributes"]["name"], "Checkout service");
}

#[tokio::test]
async fn test_apply_without_changes_only_refreshes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_get(&server, 200, remote("Checkout service")).await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("dashboard.json");
    let state = dir.path().join("dashboard.state.json");
    write_config(&file, "Checkout service");
    write_state(&state, "Checkout service");

    dashboard_cmd_with_service_url(&server.uri())
        .arg("apply")
        .arg(&file)
        .arg("--state")
        .arg(&state)
        .assert()
        .success();

    assert_eq!(read_state(&state)["id"], state_id());
}

#[tokio::test]
async fn test_apply_with_changes_replaces_in_place() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(dashboard_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote("Checkout v2")))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(&server, 200, remote("Checkout v2")).await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("dashboard.json");
    let state = dir.path().join("dashboard.state.json");
    write_config(&file, "Checkout v2");
    write_state(&state, "Checkout service");

    dashboard_cmd_with_service_url(&server.uri())
        .arg("apply")
        .arg(&file)
        .arg("--state")
        .arg(&state)
        .assert()
        .success();

    assert_eq!(read_state(&state)["attributes"]["name"], "Checkout v2");
}

#[tokio::test]
async fn test_read_of_deleted_dashboard_removes_state() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        404,
        json!({ "errors": [{ "code": "not_found", "message": "dashboard not found" }] }),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("dashboard.state.json");
    write_state(&state, "Checkout service");

    dashboard_cmd_with_service_url(&server.uri())
        .arg("read")
        .arg("--state")
        .arg(&state)
        .assert()
        .success()
        .stderr(predicate::str::contains("no longer exists"));

    assert!(!state.exists());
}

#[test]
fn test_read_without_state_fails() {
    let dir = tempfile::tempdir().unwrap();
    dashboard_cmd_with_service_url("http://127.0.0.1:1")
        .arg("read")
        .arg("--state")
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("run `apply` or `import` first"));
}

#[tokio::test]
async fn test_import_writes_state_from_fixture() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        200,
        cloudlogs_client::testing::load_fixture("dashboards/get_dashboard.json"),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("dashboard.state.json");

    dashboard_cmd_with_service_url(&server.uri())
        .args(["import", &state_id(), "--state"])
        .arg(&state)
        .assert()
        .success();

    let saved = read_state(&state);
    assert_eq!(saved["id"], state_id());
    assert_eq!(saved["attributes"]["folder_path"], json!([{ "segments": ["payments"] }]));

    dashboard_cmd_with_service_url(&server.uri())
        .args(["import", &state_id(), "--state"])
        .arg(&state)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already tracks dashboard"));
}

#[tokio::test]
async fn test_import_of_missing_dashboard_exits_4() {
    let server = MockServer::start().await;
    mount_get(&server, 404, json!({})).await;

    let dir = tempfile::tempdir().unwrap();
    dashboard_cmd_with_service_url(&server.uri())
        .args(["import", &state_id(), "--state"])
        .arg(dir.path().join("dashboard.state.json"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_import_of_malformed_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    dashboard_cmd_with_service_url("http://127.0.0.1:1")
        .args(["import", "us-south/only-two", "--state"])
        .arg(dir.path().join("dashboard.state.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected <region>/<instance_id>/<dashboard_id>"));
}

#[tokio::test]
async fn test_delete_removes_dashboard_and_state() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(dashboard_path()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("dashboard.state.json");
    write_state(&state, "Checkout service");

    dashboard_cmd_with_service_url(&server.uri())
        .arg("delete")
        .arg("--state")
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains(state_id()));

    assert!(!state.exists());
}

#[tokio::test]
async fn test_api_failures_map_to_exit_codes() {
    let cases = [(401, 2), (403, 6), (429, 7), (503, 8)];
    for (status, code) in cases {
        let server = MockServer::start().await;
        mount_get(
            &server,
            status,
            json!({ "errors": [{ "code": "error", "message": "failure" }] }),
        )
        .await;

        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("dashboard.state.json");
        write_state(&state, "Checkout service");

        dashboard_cmd_with_service_url(&server.uri())
            .arg("read")
            .arg("--state")
            .arg(&state)
            .assert()
            .code(code)
            .stderr(predicate::str::contains("ibm_logs_dashboard read failed"));

        // A failed read leaves the state untouched.
        assert_eq!(read_state(&state)["id"], state_id());
    }
}

#[test]
fn test_connection_refused_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("dashboard.state.json");
    write_state(&state, "Checkout service");

    dashboard_cmd_with_service_url("http://127.0.0.1:1")
        .arg("read")
        .arg("--state")
        .arg(&state)
        .assert()
        .code(3);
}

#[test]
fn test_apply_with_invalid_configuration_exits_5() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("dashboard.json");
    std::fs::write(&file, json!({ "instance_id": INSTANCE_ID }).to_string()).unwrap();

    dashboard_cmd_with_service_url("http://127.0.0.1:1")
        .arg("apply")
        .arg(&file)
        .arg("--state")
        .arg(dir.path().join("dashboard.state.json"))
        .assert()
        .code(5)
        .stderr(predicate::str::contains("missing required attribute"));
}

#[test]
fn test_lifecycle_commands_require_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("dashboard.state.json");
    write_state(&state, "Checkout service");

    dashboard_cmd_with_service_url("http://127.0.0.1:1")
        .env_remove("LOGS_BEARER_TOKEN")
        .arg("read")
        .arg("--state")
        .arg(&state)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Authentication configuration is required"));
}
