//! Client builder for constructing [`LogsClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (auth_strategy)
//! - Normalizing the service and IAM URLs (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, redirects)
//!
//! # Invariants
//! - `auth_strategy` must be provided before calling `build()`
//! - URLs are always normalized to have no trailing slashes

use std::time::Duration;

use cloudlogs_config::{
    AuthStrategy as ConfigAuthStrategy, Config, EndpointType,
    constants::{
        DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_IAM_URL, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES,
        DEFAULT_REGION, DEFAULT_TIMEOUT_SECS,
    },
};

use crate::auth::{AuthStrategy, TokenManager};
use crate::client::LogsClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`LogsClient`].
///
/// Everything except `auth_strategy` has a default.
pub struct LogsClientBuilder {
    auth_strategy: Option<AuthStrategy>,
    service_url: Option<String>,
    iam_url: String,
    region: String,
    endpoint_type: EndpointType,
    timeout: Duration,
    max_retries: usize,
    token_expiry_buffer_seconds: u64,
    metrics: Option<MetricsCollector>,
}

impl Default for LogsClientBuilder {
    fn default() -> Self {
        Self {
            auth_strategy: None,
            service_url: None,
            iam_url: DEFAULT_IAM_URL.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_type: EndpointType::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            token_expiry_buffer_seconds: DEFAULT_EXPIRY_BUFFER_SECS,
            metrics: None,
        }
    }
}

impl LogsClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authentication strategy.
    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Pin every request to this URL instead of a per-instance one.
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    /// Set the IAM endpoint used for API key exchange.
    pub fn iam_url(mut self, url: impl Into<String>) -> Self {
        self.iam_url = url.into();
        self
    }

    /// Set the default region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn endpoint_type(mut self, endpoint_type: EndpointType) -> Self {
        self.endpoint_type = endpoint_type;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for transient failures.
    ///
    /// Default is 3 retries with exponential backoff (1s, 2s, 4s delays).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Renew the IAM token when it expires within this many seconds.
    pub fn token_expiry_buffer_seconds(mut self, buffer: u64) -> Self {
        self.token_expiry_buffer_seconds = buffer;
        self
    }

    /// Set the metrics collector for API call performance tracking.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Create a client builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        let auth_strategy = match &config.auth.strategy {
            ConfigAuthStrategy::IamApiKey { api_key } => AuthStrategy::IamApiKey {
                api_key: api_key.clone(),
            },
            ConfigAuthStrategy::BearerToken { token } => AuthStrategy::BearerToken {
                token: token.clone(),
            },
        };

        self.auth_strategy = Some(auth_strategy);
        self.service_url = config.connection.service_url.clone();
        self.iam_url = config.connection.iam_url.clone();
        self.region = config.connection.region.clone();
        self.endpoint_type = config.connection.endpoint_type;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self.token_expiry_buffer_seconds = config.connection.token_expiry_buffer_seconds;
        self
    }

    /// Remove trailing slashes so endpoint paths can be appended directly.
    fn normalize_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`LogsClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if `auth_strategy` was not provided.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<LogsClient> {
        let auth_strategy = self
            .auth_strategy
            .ok_or_else(|| ClientError::AuthFailed("auth_strategy is required".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .build()?;

        let service_url_pinned = self.service_url.is_some();

        Ok(LogsClient {
            http,
            base_url: self.service_url.map(Self::normalize_url),
            service_url_pinned,
            iam_url: Self::normalize_url(self.iam_url),
            region: self.region,
            endpoint_type: self.endpoint_type,
            token_manager: TokenManager::new(auth_strategy),
            max_retries: self.max_retries,
            token_expiry_buffer_seconds: self.token_expiry_buffer_seconds,
            metrics: self.metrics,
        })
    }
}
