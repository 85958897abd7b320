//! Shared test utilities for logs-dashboard integration tests.
//!
//! Invariants / Assumptions:
//! - Commands are hermetic: `.env` loading is disabled and host credentials are cleared.
//! - `LOGS_BEARER_TOKEN` is set to "test-token" unless overridden.

use assert_cmd::Command;
use std::path::Path;

#[allow(dead_code)]
pub const INSTANCE_ID: &str = "0a1b2c3d-4e5f-6789-abcd-ef0123456789";
#[allow(dead_code)]
pub const DASHBOARD_ID: &str = "AbC123xyz0AbC123xyz0A";

/// Returns a hermetic `logs-dashboard` command.
pub fn dashboard_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("logs-dashboard");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("LOGS_BEARER_TOKEN", "test-token");

    cmd.env_remove("IBMCLOUD_API_KEY")
        .env_remove("IC_API_KEY")
        .env_remove("IBMCLOUD_REGION")
        .env_remove("IC_REGION")
        .env_remove("LOGS_ENDPOINT_TYPE")
        .env_remove("LOGS_SERVICE_URL")
        .env_remove("LOGS_PROFILE")
        .env_remove("LOGS_CONFIG_PATH")
        .env_remove("LOGS_OTLP_ENDPOINT")
        .env_remove("RUST_LOG");

    cmd
}

/// A hermetic command pinned to a mock server in region `us-south`.
#[allow(dead_code)]
pub fn dashboard_cmd_with_service_url(service_url: &str) -> Command {
    let mut cmd = dashboard_cmd();
    cmd.env("LOGS_SERVICE_URL", service_url)
        .env("IBMCLOUD_REGION", "us-south")
        .env("LOGS_MAX_RETRIES", "0");
    cmd
}

/// Write a minimal valid dashboard configuration to `path`.
#[allow(dead_code)]
pub fn write_config(path: &Path, name: &str) {
    let config = serde_json::json!({
        "instance_id": INSTANCE_ID,
        "name": name,
        "layout": [{}],
        "relative_time_frame": "900s",
    });
    std::fs::write(path, config.to_string()).expect("write config");
}

/// Dashboard body as returned by the API.
#[allow(dead_code)]
pub fn remote(name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": DASHBOARD_ID,
        "name": name,
        "layout": {},
        "relative_time_frame": "900s",
    })
}
