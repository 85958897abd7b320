//! IBM Cloud Logs REST API client.
//!
//! A typed client for the Cloud Logs dashboards API. Supports IBM Cloud API
//! key authentication (exchanged with IAM and renewed automatically) and
//! pre-issued bearer tokens.

mod auth;
pub mod client;
pub mod error;
pub mod metrics;
pub mod models;
pub mod telemetry;

pub mod endpoints;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{AuthStrategy, TokenManager};
pub use client::builder::LogsClientBuilder;
pub use client::{LogsClient, instance_service_url};
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::Dashboard;
