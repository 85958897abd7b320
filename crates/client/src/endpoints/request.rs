//! Retry helper for HTTP requests with exponential backoff.
//!
//! Transient failures are retried: HTTP 429/502/503/504 and transport errors
//! that never reached the server (connect failures and timeouts). Backoff is
//! `2^attempt` seconds unless the server sends a `Retry-After` header, which
//! is honored up to [`MAX_RETRY_AFTER_SECS`].

use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{ApiErrorResponse, IamErrorResponse};
use crate::telemetry::inject_trace_context;

/// Upper bound for a server-provided `Retry-After` delay.
pub const MAX_RETRY_AFTER_SECS: u64 = 60;

/// Sends an HTTP request, retrying transient failures.
///
/// `max_retries` counts retries after the first attempt, so at most
/// `max_retries + 1` requests are sent. `endpoint` and `method` label the
/// recorded metrics; pass a templated path (`/v1/dashboards/{id}`) to keep
/// label cardinality bounded.
///
/// # Errors
///
/// - [`ClientError::NotFound`] for HTTP 404.
/// - [`ClientError::ApiError`] for any other non-success status.
/// - [`ClientError::MaxRetriesExceeded`] wrapping the last failure once
///   retries are exhausted.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let mut attempt = 0;

    loop {
        let Some(attempt_builder) = builder.try_clone() else {
            debug!("Request builder cannot be cloned, single attempt only");
            return builder.send().await.map_err(ClientError::from);
        };
        let attempt_builder = inject_trace_context(attempt_builder);

        if let Some(m) = metrics {
            m.record_request(endpoint, method);
        }
        let started = Instant::now();

        let (error, retry_after) = match attempt_builder.send().await {
            Ok(response) => {
                let status = response.status();
                if let Some(m) = metrics {
                    m.record_request_duration(endpoint, method, started.elapsed(), Some(status.as_u16()));
                }

                if status.is_success() {
                    if attempt > 0 {
                        debug!(attempt = attempt + 1, "Request succeeded after retry");
                    }
                    return Ok(response);
                }

                let retry_after = retry_after_header(&response);
                let error = error_from_response(response).await;
                if !ClientError::is_retryable_status(status.as_u16()) {
                    if let Some(m) = metrics {
                        m.record_client_error(endpoint, method, &error);
                    }
                    return Err(error);
                }
                (error, retry_after)
            }
            Err(e) => {
                if let Some(m) = metrics {
                    m.record_request_duration(endpoint, method, started.elapsed(), None);
                }
                let error = ClientError::from(e);
                if !error.is_retryable() {
                    if let Some(m) = metrics {
                        m.record_client_error(endpoint, method, &error);
                    }
                    return Err(error);
                }
                (error, None)
            }
        };

        if attempt >= max_retries {
            debug!(attempts = attempt + 1, "Max retries exhausted");
            let error = ClientError::MaxRetriesExceeded(attempt + 1, Box::new(error));
            if let Some(m) = metrics {
                m.record_client_error(endpoint, method, &error);
            }
            return Err(error);
        }

        let backoff = retry_after.unwrap_or_else(|| Duration::from_secs(2u64.pow(attempt as u32)));
        attempt += 1;
        debug!(
            attempt = attempt,
            max_retries = max_retries,
            backoff_secs = backoff.as_secs(),
            error = %error,
            "Transient failure, retrying"
        );
        if let Some(m) = metrics {
            m.record_retry(endpoint, method, attempt);
        }
        tokio::time::sleep(backoff).await;
    }
}

/// Parse a `Retry-After` header given in seconds, capped at [`MAX_RETRY_AFTER_SECS`].
fn retry_after_header(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.min(MAX_RETRY_AFTER_SECS)))
}

/// Convert a non-success response into a [`ClientError`].
async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let url = response.url().to_string();
    let header_request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let (message, trace) = parse_error_body(&body);
    let request_id = trace.or(header_request_id);

    if status == StatusCode::NOT_FOUND {
        return ClientError::NotFound(format!("{url}: {message}"));
    }

    ClientError::ApiError {
        status: status.as_u16(),
        url,
        message,
        request_id,
    }
}

/// Extract a readable message and trace id from a Cloud Logs or IAM error body.
fn parse_error_body(body: &str) -> (String, Option<String>) {
    if let Ok(resp) = serde_json::from_str::<ApiErrorResponse>(body)
        && !resp.errors.is_empty()
    {
        return (resp.to_string(), resp.trace);
    }
    if let Ok(resp) = serde_json::from_str::<IamErrorResponse>(body) {
        return (resp.to_string(), None);
    }
    (body.to_string(), None)
}
