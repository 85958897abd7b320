//! Dashboard CRUD endpoints.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::endpoints::url_encoding::encode_path_segment;
use crate::endpoints::{decode_json, send_request_with_retry};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{Dashboard, DashboardJson};

const DASHBOARDS_PATH: &str = "/v1/dashboards";
const DASHBOARD_PATH: &str = "/v1/dashboards/{id}";

/// Create a dashboard and return it with its server-assigned id.
pub async fn create_dashboard(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    dashboard: &Dashboard,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Dashboard> {
    post_dashboard(client, base_url, auth_token, dashboard, max_retries, metrics).await
}

/// Create a dashboard and return the response body undecoded.
pub async fn create_dashboard_json(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    dashboard: &Dashboard,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<DashboardJson> {
    post_dashboard(client, base_url, auth_token, dashboard, max_retries, metrics).await
}

async fn post_dashboard<T: DeserializeOwned>(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    dashboard: &Dashboard,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<T> {
    debug!(name = %dashboard.name, "Creating dashboard");

    let url = format!("{}{}", base_url, DASHBOARDS_PATH);
    let builder = client.post(&url).bearer_auth(auth_token).json(dashboard);
    let response =
        send_request_with_retry(builder, max_retries, DASHBOARDS_PATH, "POST", metrics).await?;

    decode_json(response, "dashboard").await
}

/// Fetch a dashboard by id.
///
/// Returns [`crate::ClientError::NotFound`] when the dashboard does not exist.
pub async fn get_dashboard(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    dashboard_id: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Dashboard> {
    fetch_dashboard(client, base_url, auth_token, dashboard_id, max_retries, metrics).await
}

/// Fetch a dashboard by id without decoding it into the typed model.
///
/// Variants this client does not know survive, so callers can report them.
pub async fn get_dashboard_json(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    dashboard_id: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<DashboardJson> {
    fetch_dashboard(client, base_url, auth_token, dashboard_id, max_retries, metrics).await
}

async fn fetch_dashboard<T: DeserializeOwned>(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    dashboard_id: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<T> {
    let url = format!(
        "{}{}/{}",
        base_url,
        DASHBOARDS_PATH,
        encode_path_segment(dashboard_id)
    );
    let builder = client.get(&url).bearer_auth(auth_token);
    let response =
        send_request_with_retry(builder, max_retries, DASHBOARD_PATH, "GET", metrics).await?;

    decode_json(response, "dashboard").await
}

/// Replace the full definition of an existing dashboard.
pub async fn replace_dashboard(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    dashboard_id: &str,
    dashboard: &Dashboard,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Dashboard> {
    debug!(dashboard_id, "Replacing dashboard");

    let url = format!(
        "{}{}/{}",
        base_url,
        DASHBOARDS_PATH,
        encode_path_segment(dashboard_id)
    );
    let builder = client.put(&url).bearer_auth(auth_token).json(dashboard);
    let response =
        send_request_with_retry(builder, max_retries, DASHBOARD_PATH, "PUT", metrics).await?;

    decode_json(response, "dashboard").await
}

/// Delete a dashboard by id.
pub async fn delete_dashboard(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    dashboard_id: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!(dashboard_id, "Deleting dashboard");

    let url = format!(
        "{}{}/{}",
        base_url,
        DASHBOARDS_PATH,
        encode_path_segment(dashboard_id)
    );
    let builder = client.delete(&url).bearer_auth(auth_token);
    send_request_with_retry(builder, max_retries, DASHBOARD_PATH, "DELETE", metrics).await?;

    Ok(())
}
