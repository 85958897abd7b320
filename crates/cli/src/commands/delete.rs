//! Delete command: remove the tracked dashboard and its state file.

use anyhow::Result;
use serde_json::json;
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
    let id = data.id().map(str::to_string);
    let mut client = context.into_client()?;

    cancel.run(resource.delete(&mut client, &mut data)).await?;
    super::save_state(state, &data)?;

    output_result(&json!({ "deleted": id }), output_format)
}
