//! Authentication strategies and IAM token caching.

use cloudlogs_config::constants::DEFAULT_EXPIRY_BUFFER_SECS;
use secrecy::{ExposeSecret, SecretString};
use std::time::{Duration, Instant};

/// Strategy for authenticating with Cloud Logs.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// IBM Cloud API key.
    /// The client exchanges it with IAM and caches the access token.
    IamApiKey { api_key: SecretString },
    /// Pre-issued bearer token, sent as-is and never refreshed.
    BearerToken { token: SecretString },
}

/// Holds the IAM access token for the configured strategy.
#[derive(Debug)]
pub struct TokenManager {
    auth_strategy: AuthStrategy,
    access_token: Option<AccessToken>,
}

/// Access token with expiry information.
#[derive(Debug, Clone)]
struct AccessToken {
    value: SecretString,
    expires_at: Option<Instant>,
    expiry_buffer_seconds: u64,
}

impl AccessToken {
    fn new(
        value: SecretString,
        ttl_seconds: Option<u64>,
        expiry_buffer_seconds: Option<u64>,
    ) -> Self {
        Self {
            value,
            expires_at: ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl)),
            expiry_buffer_seconds: expiry_buffer_seconds.unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at
            .map(|exp| exp.saturating_duration_since(Instant::now()).is_zero())
            .unwrap_or(false)
    }

    /// True when less than the buffer window remains.
    fn will_expire_soon(&self) -> bool {
        self.expires_at
            .map(|exp| {
                let buffer = Duration::from_secs(self.expiry_buffer_seconds);
                exp.saturating_duration_since(Instant::now()) < buffer
            })
            .unwrap_or(false)
    }
}

impl TokenManager {
    /// Create a new token manager with the given auth strategy.
    pub fn new(strategy: AuthStrategy) -> Self {
        Self {
            auth_strategy: strategy,
            access_token: None,
        }
    }

    pub fn strategy(&self) -> &AuthStrategy {
        &self.auth_strategy
    }

    /// Check if we're using a static bearer token (no IAM exchange needed).
    pub fn is_static_token(&self) -> bool {
        matches!(self.auth_strategy, AuthStrategy::BearerToken { .. })
    }

    /// Get the bearer token for API requests.
    /// For static tokens, returns the token directly.
    /// For API key auth, returns the cached IAM token if one exists.
    pub fn get_bearer_token(&self) -> Option<&str> {
        match &self.auth_strategy {
            AuthStrategy::BearerToken { token } => Some(token.expose_secret()),
            AuthStrategy::IamApiKey { .. } => {
                self.access_token.as_ref().map(|t| t.value.expose_secret())
            }
        }
    }

    /// Store a freshly issued IAM access token.
    ///
    /// `ttl_seconds` of `None` means the token never expires locally.
    pub fn set_access_token(
        &mut self,
        token: String,
        ttl_seconds: Option<u64>,
        expiry_buffer_seconds: Option<u64>,
    ) {
        self.access_token = Some(AccessToken::new(
            SecretString::new(token.into()),
            ttl_seconds,
            expiry_buffer_seconds,
        ));
    }

    /// Returns false for static tokens, true if no access token exists.
    fn check_token<F>(&self, check: F) -> bool
    where
        F: FnOnce(&AccessToken) -> bool,
    {
        if self.is_static_token() {
            return false;
        }
        self.access_token.as_ref().map(check).unwrap_or(true)
    }

    pub fn is_token_expired(&self) -> bool {
        self.check_token(|t| t.is_expired())
    }

    pub fn token_expires_soon(&self) -> bool {
        self.check_token(|t| t.will_expire_soon())
    }

    /// Drop the cached access token (forces a new IAM exchange).
    pub fn clear_token(&mut self) {
        self.access_token = None;
    }
}
