//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define configuration types for authentication, connections, and profiles.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Actual network connections or token exchange (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - `KEYRING_SERVICE` is the canonical service name for all keyring operations.

mod auth;
mod connection;
mod profile;

pub use auth::{AuthConfig, AuthStrategy, KEYRING_SERVICE, SecureValue};
pub use connection::{Config, ConnectionConfig, EndpointType};
pub use profile::ProfileConfig;
