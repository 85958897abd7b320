//! Import command: adopt an existing dashboard into a state file.

use anyhow::{Result, bail};
use std::path::Path;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::config_context::ConfigCommandContext;
use crate::formatters::{OutputFormat, output_result};

pub async fn run(
    context: ConfigCommandContext,
    id: &str,
    state: &Path,
    output_format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    if let Some(existing) = super::load_state(state)?
        && let Some(tracked) = existing.id()
    {
        bail!("{} already tracks dashboard {tracked}", state.display());
    }

    let resource = super::dashboard_resource()?;
    let mut client = context.into_client()?;

    info!(id, "Importing dashboard");
    let data = cancel.run(resource.import(&mut client, id)).await?;
    super::save_state(state, &data)?;
    output_result(&data, output_format)
}
