//! Data models for Cloud Logs API requests and responses.
//!
//! Types are organized by resource in submodules and re-exported here.

pub mod auth;
pub mod common;
pub mod dashboards;

pub use auth::{IamErrorResponse, IamTokenResponse};
pub use common::{ApiErrorDetail, ApiErrorResponse};
pub use dashboards::*;
