//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError and ResourceError values to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use cloudlogs_client::ClientError;
use cloudlogs_provider::{ResourceError, ResourceErrorKind};

/// Structured exit codes for logs-dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Invalid API key, rejected or expired token.
    ///
    /// Scripts should refresh credentials.
    AuthenticationFailed = 2,

    /// Network, timeout, or DNS failure.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// The dashboard tracked in state or named by an id does not exist.
    NotFound = 4,

    /// Invalid configuration or a request the service rejected as malformed.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Insufficient privileges on the instance.
    PermissionDenied = 6,

    /// HTTP 429 Too Many Requests after retries.
    RateLimited = 7,

    /// HTTP 502/503/504 after retries.
    ServiceUnavailable = 8,

    /// SIGINT/Ctrl+C (128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Returns true if this exit code indicates a retryable condition.
    #[allow(dead_code)]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ExitCode::ConnectionError | ExitCode::RateLimited | ExitCode::ServiceUnavailable
        )
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            // Authentication errors (exit code 2)
            ClientError::AuthFailed(_) => ExitCode::AuthenticationFailed,
            ClientError::TokenExpired => ExitCode::AuthenticationFailed,
            ClientError::Unauthorized(_) => ExitCode::AuthenticationFailed,
            ClientError::ApiError { status: 401, .. } => ExitCode::AuthenticationFailed,

            // Connection errors (exit code 3)
            ClientError::ConnectionRefused(_) => ExitCode::ConnectionError,
            ClientError::Timeout(_) => ExitCode::ConnectionError,
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::TlsError(_) => ExitCode::ConnectionError,

            // Not found (exit code 4)
            ClientError::NotFound(_) => ExitCode::NotFound,
            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,

            // Validation errors (exit code 5)
            ClientError::InvalidResponse(_) => ExitCode::ValidationError,
            ClientError::ApiError { status: 400, .. } => ExitCode::ValidationError,

            // Permission denied (exit code 6)
            ClientError::ApiError { status: 403, .. } => ExitCode::PermissionDenied,

            // Rate limited (exit code 7)
            ClientError::RateLimited(_) => ExitCode::RateLimited,
            ClientError::ApiError { status: 429, .. } => ExitCode::RateLimited,

            // Service unavailable (exit code 8)
            ClientError::ApiError {
                status: 502..=504, ..
            } => ExitCode::ServiceUnavailable,

            // Max retries exceeded - check the underlying error recursively
            ClientError::MaxRetriesExceeded(_, inner) => Self::from(inner.as_ref()),

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::ApiError { .. } => ExitCode::GeneralError,
        }
    }
}

impl From<&ResourceError> for ExitCode {
    fn from(err: &ResourceError) -> Self {
        match &err.kind {
            ResourceErrorKind::Client(e) => Self::from(e),
            ResourceErrorKind::Validation(_) | ResourceErrorKind::BuildRequest(_) => {
                ExitCode::ValidationError
            }
            ResourceErrorKind::NotFound(_) => ExitCode::NotFound,
            ResourceErrorKind::ReadResponse(_)
            | ResourceErrorKind::InvalidId(_)
            | ResourceErrorKind::InvalidState(_) => ExitCode::GeneralError,
        }
    }
}

/// Extract exit codes from errors that crossed the anyhow boundary.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(resource_err) = cause.downcast_ref::<ResourceError>() {
                return ExitCode::from(resource_err);
            }
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
        }

        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudlogs_provider::{Diagnostics, Operation, RESOURCE_TYPE};
    use std::time::Duration;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "https://inst.api.us-south.logs.cloud.ibm.com/v1/dashboards".to_string(),
            message: "error".to_string(),
            request_id: None,
        }
    }

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::ValidationError.as_i32(), 5);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_is_retryable() {
        assert!(ExitCode::ConnectionError.is_retryable());
        assert!(ExitCode::RateLimited.is_retryable());
        assert!(ExitCode::ServiceUnavailable.is_retryable());
        assert!(!ExitCode::NotFound.is_retryable());
        assert!(!ExitCode::ValidationError.is_retryable());
    }

    #[test]
    fn test_client_errors_map_to_categories() {
        assert_eq!(
            ExitCode::from(&ClientError::AuthFailed("bad key".into())),
            ExitCode::AuthenticationFailed
        );
        assert_eq!(
            ExitCode::from(&ClientError::Timeout(Duration::from_secs(30))),
            ExitCode::ConnectionError
        );
        assert_eq!(
            ExitCode::from(&ClientError::NotFound("dashboard".into())),
            ExitCode::NotFound
        );
        assert_eq!(ExitCode::from(&api_error(400)), ExitCode::ValidationError);
        assert_eq!(ExitCode::from(&api_error(401)), ExitCode::AuthenticationFailed);
        assert_eq!(ExitCode::from(&api_error(403)), ExitCode::PermissionDenied);
        assert_eq!(ExitCode::from(&api_error(429)), ExitCode::RateLimited);
        assert_eq!(ExitCode::from(&api_error(503)), ExitCode::ServiceUnavailable);
        assert_eq!(ExitCode::from(&api_error(500)), ExitCode::GeneralError);
    }

    #[test]
    fn test_max_retries_exceeded_uses_last_failure() {
        let inner = ClientError::ConnectionRefused("localhost:1".to_string());
        let err = ClientError::MaxRetriesExceeded(3, Box::new(inner));
        assert_eq!(ExitCode::from(&err), ExitCode::ConnectionError);
    }

    #[test]
    fn test_resource_errors_through_anyhow() {
        let validation = ResourceError::new(
            RESOURCE_TYPE,
            Operation::Plan,
            ResourceErrorKind::Validation(Diagnostics::new()),
        );
        let err = anyhow::Error::new(validation).context("Failed to apply dashboard.yaml");
        assert_eq!(err.exit_code(), ExitCode::ValidationError);

        let forbidden = ResourceError::new(
            RESOURCE_TYPE,
            Operation::Create,
            ResourceErrorKind::Client(api_error(403)),
        );
        assert_eq!(anyhow::Error::new(forbidden).exit_code(), ExitCode::PermissionDenied);

        let missing = ResourceError::new(
            RESOURCE_TYPE,
            Operation::Import,
            ResourceErrorKind::NotFound("dashboard r/i/d".into()),
        );
        assert_eq!(anyhow::Error::new(missing).exit_code(), ExitCode::NotFound);

        assert_eq!(anyhow::anyhow!("boom").exit_code(), ExitCode::GeneralError);
    }
}
