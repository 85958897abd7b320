//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests that touch the process environment use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

mod env_tests;

/// Variables read by `from_env`, cleared by tests that need a clean slate.
pub const LOADER_ENV_VARS: &[&str] = &[
    "IBMCLOUD_API_KEY",
    "IC_API_KEY",
    "LOGS_BEARER_TOKEN",
    "IBMCLOUD_REGION",
    "IC_REGION",
    "LOGS_ENDPOINT_TYPE",
    "LOGS_SERVICE_URL",
    "IBMCLOUD_IAM_URL",
    "LOGS_TIMEOUT",
    "LOGS_MAX_RETRIES",
    "LOGS_TOKEN_EXPIRY_BUFFER",
    "LOGS_CONFIG_PATH",
    "LOGS_PROFILE",
];

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
