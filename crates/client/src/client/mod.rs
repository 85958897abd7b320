//! Main Cloud Logs REST API client.
//!
//! [`LogsClient`] talks to one Cloud Logs instance at a time and handles IAM
//! token exchange and renewal transparently.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: IAM token retrieval helpers (private module)
//! - `dashboards`: Dashboard CRUD methods
//!
//! # Invariants
//! - All API methods handle 401/403 by clearing the cached IAM token,
//!   re-authenticating and retrying once (API key auth only; bearer tokens
//!   are never renewed)
//! - The `retry_call!` macro centralizes this retry pattern across all API methods
//! - A configured service URL pins the client to that URL; otherwise the
//!   URL is derived from instance id, region and endpoint type

pub mod builder;
mod dashboards;
mod session;

use cloudlogs_config::EndpointType;
use cloudlogs_config::constants::LOGS_API_DOMAIN;

use crate::auth::TokenManager;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Wrap an async API call with automatic token renewal on 401/403 errors.
///
/// ```ignore
/// retry_call!(self, __token, endpoints::some_endpoint(&self.http, &base_url, &__token, arg).await)
/// ```
///
/// The placeholder `__token` is bound to the current bearer token.
#[macro_export]
macro_rules! retry_call {
    ($self:expr, $token:ident, $call:expr) => {{
        let $token = $self.get_auth_token().await?;
        let result = $call;

        match result {
            Ok(data) => Ok(data),
            Err($crate::error::ClientError::ApiError { status, .. })
                if (status == 401 || status == 403) && !$self.is_static_token_auth() =>
            {
                ::tracing::debug!(
                    "IAM token rejected (status {}), clearing and re-authenticating...",
                    status
                );
                $self.token_manager.clear_token();
                let $token = $self.get_auth_token().await?;
                $call
            }
            Err(e) => Err(e),
        }
    }};
}

/// Build the service URL of a Cloud Logs instance.
///
/// - public: `https://{instance}.api.{region}.logs.cloud.ibm.com`
/// - private: `https://{instance}.api.private.{region}.logs.cloud.ibm.com`
pub fn instance_service_url(instance_id: &str, region: &str, endpoint_type: EndpointType) -> String {
    match endpoint_type {
        EndpointType::Public => format!("https://{instance_id}.api.{region}.{LOGS_API_DOMAIN}"),
        EndpointType::Private => {
            format!("https://{instance_id}.api.private.{region}.{LOGS_API_DOMAIN}")
        }
    }
}

/// Cloud Logs REST API client.
///
/// ```rust,ignore
/// use cloudlogs_client::{LogsClient, AuthStrategy};
/// use secrecy::SecretString;
///
/// let mut client = LogsClient::builder()
///     .auth_strategy(AuthStrategy::IamApiKey {
///         api_key: SecretString::new("my-key".to_string().into()),
///     })
///     .region("eu-de")
///     .build()?;
/// client.use_instance("0b1a2c3d-instance", None, None);
/// let dashboard = client.get_dashboard("AbC123xyz").await?;
/// ```
#[derive(Debug)]
pub struct LogsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Option<String>,
    pub(crate) service_url_pinned: bool,
    pub(crate) iam_url: String,
    pub(crate) region: String,
    pub(crate) endpoint_type: EndpointType,
    pub(crate) token_manager: TokenManager,
    pub(crate) max_retries: usize,
    pub(crate) token_expiry_buffer_seconds: u64,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl LogsClient {
    /// Create a new client builder.
    pub fn builder() -> builder::LogsClientBuilder {
        builder::LogsClientBuilder::new()
    }

    /// Base URL of the selected instance, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Default region for instances that do not name one.
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn endpoint_type(&self) -> EndpointType {
        self.endpoint_type
    }

    /// Point the client at a Cloud Logs instance.
    ///
    /// `region` and `endpoint_type` fall back to the client defaults. Does
    /// nothing when a service URL was configured explicitly.
    pub fn use_instance(
        &mut self,
        instance_id: &str,
        region: Option<&str>,
        endpoint_type: Option<EndpointType>,
    ) {
        if self.service_url_pinned {
            return;
        }
        let region = region.unwrap_or(&self.region);
        let endpoint_type = endpoint_type.unwrap_or(self.endpoint_type);
        self.base_url = Some(instance_service_url(instance_id, region, endpoint_type));
    }

    pub(crate) fn require_base_url(&self) -> Result<String> {
        self.base_url.clone().ok_or_else(|| {
            ClientError::InvalidUrl("no Cloud Logs instance selected".to_string())
        })
    }
}
