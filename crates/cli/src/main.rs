//! logs-dashboard - manage an IBM Cloud Logs dashboard from a configuration file.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Load connection settings for commands that reach the service.
//! - Run the `ibm_logs_dashboard` resource lifecycle against a local state file.
//!
//! Does NOT handle:
//! - Schema, mapping or lifecycle logic (see `crates/provider`).
//! - REST calls, authentication and retries (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - Results go to stdout; logs and diagnostics go to stderr.

mod args;
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;

use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use cloudlogs_config::ConfigLoader;
use config_context::ConfigCommandContext;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(ExitCode::GeneralError.as_i32());
}

/// Merge profile, environment and CLI flags into a connection config.
fn load_config(cli: &Cli) -> anyhow::Result<cloudlogs_config::Config> {
    let mut loader = ConfigLoader::new();

    // Blank values are ignored so the environment can still supply them.
    if let Some(ref path) = cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }
    if let Some(ref profile_name) = cli.profile {
        loader = loader.with_profile_name(profile_name.clone());
    }

    // Profile first, then environment, then CLI flags.
    loader = loader.from_profile()?.from_env()?;

    if let Some(ref key) = cli.api_key {
        loader = loader.with_api_key(key.clone());
    }
    if let Some(ref token) = cli.bearer_token {
        loader = loader.with_bearer_token(token.clone());
    }
    if let Some(ref region) = cli.region {
        loader = loader.with_region(region.clone());
    }
    if let Some(endpoint_type) = cli.endpoint_type {
        loader = loader.with_endpoint_type(endpoint_type);
    }
    if let Some(ref url) = cli.service_url {
        loader = loader.with_service_url(url.clone());
    }
    if let Some(ref url) = cli.iam_url {
        loader = loader.with_iam_url(url.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }

    Ok(loader.build()?)
}

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        exit_with(format!("Failed to load environment: {e}"));
    }

    let cli = Cli::parse();

    let _tracing_guard = if let Some(ref endpoint) = cli.otlp_endpoint {
        let service_name = cli
            .otel_service_name
            .clone()
            .unwrap_or_else(|| "logs-dashboard".to_string());

        let config = cloudlogs_client::telemetry::TracingConfig::new()
            .with_otlp_endpoint(endpoint)
            .with_service_name(service_name)
            .with_stdout(true);

        match config.init() {
            Ok(guard) => Some(guard),
            Err(e) => exit_with(format!("Failed to initialize OpenTelemetry tracing: {e}")),
        }
    } else {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        None
    };

    let with_metrics = match cli.metrics_bind.as_deref() {
        Some(bind) => {
            let addr: SocketAddr = match bind.parse() {
                Ok(addr) => addr,
                Err(e) => exit_with(format!("Invalid --metrics-bind address '{bind}': {e}")),
            };
            if let Err(e) = metrics_exporter_prometheus::PrometheusBuilder::new()
                .with_http_listener(addr)
                .install()
            {
                exit_with(format!("Failed to start metrics exporter: {e}"));
            }
            tracing::info!("Metrics exporter started on http://{addr}/metrics");
            true
        }
        None => false,
    };

    let context = if cli.command.needs_connection() {
        match load_config(&cli) {
            Ok(config) => ConfigCommandContext::Real(Box::new(config), with_metrics),
            Err(e) => exit_with(format!("Failed to build configuration: {e:#}")),
        }
    } else {
        ConfigCommandContext::Offline
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {e}");
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, context, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{e:#}");
            e.exit_code()
        }
    };

    if let Some(guard) = _tracing_guard {
        guard.shutdown();
    }

    std::process::exit(exit_code.as_i32());
}
