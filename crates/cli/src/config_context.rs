//! Configuration context for command execution.
//!
//! Responsibilities:
//! - Distinguish between commands that reach the service and offline commands.
//! - Provide type-safe extraction of config for commands that need it.
//!
//! Does NOT handle:
//! - Configuration loading (done in `main()`).
//!
//! Invariants:
//! - Offline commands (`schema`, `validate`, `plan`) never require credentials.

use anyhow::Result;
use cloudlogs_client::{LogsClient, MetricsCollector};
use cloudlogs_config::Config;

/// Context for command execution.
pub(crate) enum ConfigCommandContext {
    /// A validated config loaded from profile, environment and CLI args,
    /// plus whether API metrics are recorded.
    Real(Box<Config>, bool),
    /// No connection details; only valid for offline commands.
    Offline,
}

impl ConfigCommandContext {
    /// Build an API client, failing for offline contexts.
    pub(crate) fn into_client(self) -> Result<LogsClient> {
        match self {
            ConfigCommandContext::Real(config, with_metrics) => {
                let mut builder = LogsClient::builder().from_config(&config);
                if with_metrics {
                    builder = builder.metrics(MetricsCollector::new());
                }
                Ok(builder.build()?)
            }
            ConfigCommandContext::Offline => {
                anyhow::bail!(
                    "Internal error: attempted to build a client for a command without connection details"
                )
            }
        }
    }
}
