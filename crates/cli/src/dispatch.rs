//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Hand connection details only to commands that reach the service.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()` and `config_context`).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;
use crate::config_context::ConfigCommandContext;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(
    cli: Cli,
    context: ConfigCommandContext,
    cancel_token: &CancellationToken,
) -> Result<()> {
    let output = cli.output;
    match cli.command {
        Commands::Schema => commands::schema::run(output),
        Commands::Validate { file } => commands::validate::run(&file, output),
        Commands::Plan { file, state } => commands::plan::run(&file, &state, output),
        Commands::Apply { file, state } => {
            commands::apply::run(context, &file, &state, output, cancel_token).await
        }
        Commands::Read { state } => {
            commands::read::run(context, &state, output, cancel_token).await
        }
        Commands::Import { id, state } => {
            commands::import::run(context, &id, &state, output, cancel_token).await
        }
        Commands::Delete { state } => {
            commands::delete::run(context, &state, output, cancel_token).await
        }
    }
}
