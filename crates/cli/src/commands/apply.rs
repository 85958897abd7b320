//! Apply command implementation.
//!
//! Responsibilities:
//! - Plan the configuration against the state file.
//! - Create, update or replace the dashboard accordingly.
//! - Persist the resulting state.
//!
//! Invariants:
//! - The state file is written only after the service call succeeded, except
//!   that a created dashboard is recorded even when reading it back failed.
//! - Replacement deletes the old dashboard before creating the new one.

use anyhow::{Context, Result};
use cloudlogs_client::LogsClient;
use cloudlogs_provider::{DashboardResource, FlatMap, Plan, ResourceData};
use std::path::Path;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::config_context::ConfigCommandContext;
use crate::formatters::{OutputFormat, output_result};

pub async fn run(
    context: ConfigCommandContext,
    file: &Path,
    state: &Path,
    output_format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let resource = super::dashboard_resource()?;
    let config = super::load_configuration(file)?;
    let prior = super::load_state(state)?.filter(|prior| prior.exists());

    let plan = resource
        .plan(prior.as_ref(), &config)
        .with_context(|| format!("Failed to plan {}", file.display()))?;
    info!(plan = ?plan, "Applying configuration");

    let mut client = context.into_client()?;
    let data = match (plan, prior) {
        (Plan::Create, _) | (_, None) => {
            create(&resource, &mut client, &config, state, cancel).await?
        }
        (Plan::Replace { changed }, Some(mut prior)) => {
            info!(changed = ?changed, "Replacing dashboard");
            cancel.run(resource.delete(&mut client, &mut prior)).await?;
            super::save_state(state, &prior)?;
            create(&resource, &mut client, &config, state, cancel).await?
        }
        (Plan::Update { .. } | Plan::NoOp, Some(prior)) => {
            cancel.run(resource.update(&mut client, &prior, &config)).await?
        }
    };

    super::save_state(state, &data)?;
    if !data.exists() {
        eprintln!("Dashboard no longer exists; removed it from {}", state.display());
    }
    output_result(&data, output_format)
}

/// Creates the dashboard, saving its id if the follow-up read fails so the
/// next apply does not create a duplicate.
async fn create(
    resource: &DashboardResource,
    client: &mut LogsClient,
    config: &FlatMap,
    state: &Path,
    cancel: &CancellationToken,
) -> Result<ResourceData> {
    let mut data = ResourceData::default();
    let result = cancel.run(resource.create(client, config, &mut data)).await;
    if let Err(err) = result {
        if data.exists() {
            super::save_state(state, &data)?;
            eprintln!(
                "Dashboard {} was created but could not be read back; recorded it in {}",
                data.id().unwrap_or_default(),
                state.display()
            );
        }
        return Err(err);
    }
    Ok(data)
}
