//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not handle config loading (see `main()`).

use clap::{Parser, Subcommand};
use cloudlogs_config::EndpointType;
use std::path::PathBuf;

use crate::formatters::OutputFormat;

/// Default location of the resource state file.
pub const DEFAULT_STATE_PATH: &str = "dashboard.state.json";

#[derive(Parser)]
#[command(name = "logs-dashboard")]
#[command(about = "Manage an IBM Cloud Logs dashboard from a declarative configuration file", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  logs-dashboard validate dashboard.yaml\n  logs-dashboard plan dashboard.yaml\n  logs-dashboard apply dashboard.yaml --state prod.state.json\n  logs-dashboard import us-south/<instance_id>/<dashboard_id>\n  logs-dashboard --profile prod delete\n"
)]
pub struct Cli {
    /// IBM Cloud API key, exchanged for an IAM token
    #[arg(long, global = true, env = "IBMCLOUD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Pre-issued bearer token (skips the IAM exchange)
    #[arg(long, global = true, env = "LOGS_BEARER_TOKEN", hide_env_values = true)]
    pub bearer_token: Option<String>,

    /// Region used when the configuration does not name one (e.g. us-south)
    #[arg(short, long, global = true, env = "IBMCLOUD_REGION")]
    pub region: Option<String>,

    /// Reach the instance over its public or private endpoint
    #[arg(long, global = true, env = "LOGS_ENDPOINT_TYPE")]
    pub endpoint_type: Option<EndpointType>,

    /// Fixed Cloud Logs service URL, replacing the per-instance URL
    #[arg(long, global = true, env = "LOGS_SERVICE_URL")]
    pub service_url: Option<String>,

    /// IAM endpoint for API key exchange
    #[arg(long, global = true, env = "IBMCLOUD_IAM_URL")]
    pub iam_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "LOGS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for failed requests
    #[arg(long, global = true, env = "LOGS_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Profile name to load from config file
    #[arg(long, global = true, env = "LOGS_PROFILE")]
    pub profile: Option<String>,

    /// Path to a custom configuration file (overrides default location).
    ///
    /// Can also be set via LOGS_CONFIG_PATH environment variable.
    #[arg(long, global = true, env = "LOGS_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Output format (json, yaml)
    #[arg(short, long, global = true, default_value = "json")]
    pub output: OutputFormat,

    /// OTLP endpoint for exporting traces (e.g. http://localhost:4317)
    #[arg(long, global = true, env = "LOGS_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Service name reported with exported traces
    #[arg(long, global = true, env = "OTEL_SERVICE_NAME")]
    pub otel_service_name: Option<String>,

    /// Expose Prometheus metrics for API calls on this address (e.g. 127.0.0.1:9000)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the attribute schema of the dashboard resource
    Schema,

    /// Check a configuration file without contacting the service
    Validate {
        /// Configuration file (.json, .yaml or .yml)
        file: PathBuf,
    },

    /// Show what `apply` would do for a configuration file
    Plan {
        /// Configuration file (.json, .yaml or .yml)
        file: PathBuf,

        /// Resource state file
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: PathBuf,
    },

    /// Create, update or replace the dashboard so it matches a configuration file
    Apply {
        /// Configuration file (.json, .yaml or .yml)
        file: PathBuf,

        /// Resource state file
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: PathBuf,
    },

    /// Refresh the state file from the service
    Read {
        /// Resource state file
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: PathBuf,
    },

    /// Adopt an existing dashboard into a state file
    Import {
        /// Dashboard id in the form <region>/<instance_id>/<dashboard_id>
        id: String,

        /// Resource state file
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: PathBuf,
    },

    /// Delete the dashboard tracked by a state file
    Delete {
        /// Resource state file
        #[arg(long, default_value = DEFAULT_STATE_PATH)]
        state: PathBuf,
    },
}

impl Commands {
    /// True for commands that talk to the service and need credentials.
    pub fn needs_connection(&self) -> bool {
        matches!(
            self,
            Commands::Apply { .. }
                | Commands::Read { .. }
                | Commands::Import { .. }
                | Commands::Delete { .. }
        )
    }
}
