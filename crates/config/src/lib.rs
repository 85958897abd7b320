//! Configuration management for the Cloud Logs dashboard tooling.
//!
//! This crate provides types and loaders for the connection and
//! authentication settings used to reach a Cloud Logs instance, sourced from
//! builder overrides, environment variables, `.env` files and profile files.

pub mod constants;
mod loader;
pub mod persistence;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{
    AuthConfig, AuthStrategy, Config, ConnectionConfig, EndpointType, ProfileConfig, SecureValue,
};
