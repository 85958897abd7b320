//! Read command: refresh the state file from the service.

use anyhow::Result;
use std::path::Path;

use crate::cancellation::CancellationToken;
use crate::config_context::ConfigCommandContext;
use crate::formatters::{OutputFormat, output_result};

pub async fn run(
    context: ConfigCommandContext,
    state: &Path,
    output_format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let resource = super::dashboard_resource()?;
    let mut data = super::load_existing_state(state)?;
    let mut client = context.into_client()?;

    cancel.run(resource.read(&mut client, &mut data)).await?;
    super::save_state(state, &data)?;

    if !data.exists() {
        eprintln!("Dashboard no longer exists; removed it from {}", state.display());
    }
    output_result(&data, output_format)
}
