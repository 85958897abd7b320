//! Client-level IAM token helpers.
//!
//! # Invariants
//! - [`LogsClient::get_auth_token`] requires `&mut self` because it may trigger an IAM exchange
//! - Bearer token authentication never calls IAM; the token is returned directly
//! - API key authentication renews the token before it expires

use secrecy::ExposeSecret;

use crate::auth::AuthStrategy;
use crate::client::LogsClient;
use crate::endpoints;
use crate::error::{ClientError, Result};

impl LogsClient {
    /// Get the current bearer token, exchanging the API key if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if the IAM exchange fails.
    /// Returns [`ClientError::TokenExpired`] if no valid token is available.
    pub(crate) async fn get_auth_token(&mut self) -> Result<String> {
        if self.token_manager.is_static_token()
            && let Some(token) = self.token_manager.get_bearer_token()
        {
            return Ok(token.to_string());
        }

        if self.token_manager.is_token_expired() || self.token_manager.token_expires_soon() {
            self.authenticate().await?;
        }

        self.token_manager
            .get_bearer_token()
            .map(|s| s.to_string())
            .ok_or(ClientError::TokenExpired)
    }

    /// True when the client sends a fixed bearer token.
    pub fn is_static_token_auth(&self) -> bool {
        self.token_manager.is_static_token()
    }

    /// Exchange the API key for a fresh IAM access token.
    ///
    /// Only valid for [`AuthStrategy::IamApiKey`]. The token is cached with
    /// the lifetime reported by IAM.
    pub async fn authenticate(&mut self) -> Result<String> {
        if let AuthStrategy::IamApiKey { api_key } = self.token_manager.strategy() {
            let response = endpoints::request_iam_token(
                &self.http,
                &self.iam_url,
                api_key.expose_secret(),
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await?;

            let token = response.access_token;
            self.token_manager.set_access_token(
                token.clone(),
                response.expires_in,
                Some(self.token_expiry_buffer_seconds),
            );

            Ok(token)
        } else {
            Err(ClientError::AuthFailed(
                "Cannot exchange a bearer token with IAM".to_string(),
            ))
        }
    }
}
