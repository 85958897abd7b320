//! API call metrics recorded through the `metrics` facade.
//!
//! Nothing is exported unless the host installs a recorder (the CLI does so
//! with `--metrics-bind`). Every series carries `endpoint` and `method`
//! labels; endpoints are path templates such as `/v1/dashboards/{id}` so
//! dashboard ids never become label values.

use crate::error::ClientError;
use std::time::Duration;

pub const METRIC_REQUEST_DURATION: &str = "cloudlogs_api_request_duration_seconds";
pub const METRIC_REQUESTS_TOTAL: &str = "cloudlogs_api_requests_total";
pub const METRIC_RETRIES_TOTAL: &str = "cloudlogs_api_retries_total";
pub const METRIC_ERRORS_TOTAL: &str = "cloudlogs_api_errors_total";

/// Coarse failure class used as the `error_category` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Auth,
    NotFound,
    RateLimited,
    Rejected,
    Server,
    Timeout,
    Transport,
    Other,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "auth",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::RateLimited => "rate_limited",
            ErrorCategory::Rejected => "rejected",
            ErrorCategory::Server => "server",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Transport => "transport",
            ErrorCategory::Other => "other",
        }
    }

    fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorCategory::Auth,
            404 => ErrorCategory::NotFound,
            429 => ErrorCategory::RateLimited,
            400..=499 => ErrorCategory::Rejected,
            500..=599 => ErrorCategory::Server,
            _ => ErrorCategory::Other,
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::MaxRetriesExceeded(_, last) => Self::from(last.as_ref()),
            ClientError::AuthFailed(_) | ClientError::TokenExpired | ClientError::Unauthorized(_) => {
                ErrorCategory::Auth
            }
            ClientError::NotFound(_) => ErrorCategory::NotFound,
            ClientError::RateLimited(_) => ErrorCategory::RateLimited,
            ClientError::ApiError { status, .. } => Self::from_status(*status),
            ClientError::Timeout(_) => ErrorCategory::Timeout,
            ClientError::ConnectionRefused(_) | ClientError::TlsError(_) => ErrorCategory::Transport,
            ClientError::HttpError(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::HttpError(e) if e.is_connect() => ErrorCategory::Transport,
            _ => ErrorCategory::Other,
        }
    }
}

/// Records request counts, latencies, retries and failures.
///
/// A default collector is disabled; the client only calls into one when the
/// builder was given `.metrics(MetricsCollector::new())`.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// `status` is `None` when no response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }
        let status = status.map_or_else(|| "none".to_string(), |s| s.to_string());
        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status,
        )
        .record(duration.as_secs_f64());
    }

    pub fn record_request(&self, endpoint: &str, method: &str) {
        if self.enabled {
            metrics::counter!(METRIC_REQUESTS_TOTAL,
                "endpoint" => endpoint.to_string(),
                "method" => method.to_string(),
            )
            .increment(1);
        }
    }

    /// `attempt` counts retries from 1.
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if self.enabled {
            metrics::counter!(METRIC_RETRIES_TOTAL,
                "endpoint" => endpoint.to_string(),
                "method" => method.to_string(),
                "attempt" => attempt.to_string(),
            )
            .increment(1);
        }
    }

    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        if self.enabled {
            metrics::counter!(METRIC_ERRORS_TOTAL,
                "endpoint" => endpoint.to_string(),
                "method" => method.to_string(),
                "error_category" => ErrorCategory::from(error).as_str(),
            )
            .increment(1);
        }
    }
}
