//! Token manager implementation
//!
//! Handles attaching the bearer token to requests and re-logging in when
//! the cached credential is about to expire.

use super::types::Credential;
use crate::config::{ConfigStore, TapConfig};
use crate::error::{Error, Result};
use crate::types::StringMap;
use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Owns the single live credential of the process
pub struct TokenManager {
    /// In-memory config, including the current credential
    config: RwLock<TapConfig>,
    /// Where refreshed credentials are persisted
    store: Arc<dyn ConfigStore>,
    /// Login endpoint
    token_url: String,
    /// HTTP client for login requests
    http_client: Client,
}

impl TokenManager {
    /// Create a token manager for an already loaded config
    pub fn new(config: TapConfig, store: Arc<dyn ConfigStore>) -> Self {
        Self::with_client(config, store, Client::new())
    }

    /// Create a token manager with a custom HTTP client
    pub fn with_client(config: TapConfig, store: Arc<dyn ConfigStore>, http_client: Client) -> Self {
        let token_url = config.token_url();
        Self {
            config: RwLock::new(config),
            store,
            token_url,
            http_client,
        }
    }

    /// Create a token manager from whatever the store currently holds
    pub async fn from_store(store: Arc<dyn ConfigStore>) -> Result<Self> {
        let config = store.load().await?;
        Ok(Self::new(config, store))
    }

    /// Login endpoint in use
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Snapshot of the current credential
    pub async fn credential(&self) -> Credential {
        self.config.read().await.credential()
    }

    /// Whether the current credential can be used right now
    pub async fn is_valid(&self) -> bool {
        self.config.read().await.credential().is_valid()
    }

    /// Return a valid access token, logging in first if necessary
    pub async fn ensure_fresh(&self) -> Result<String> {
        {
            let config = self.config.read().await;
            let credential = config.credential();
            if credential.is_valid() {
                return Ok(credential.access_token);
            }
        }

        let mut config = self.config.write().await;

        // Another task may have refreshed while we waited for the lock
        let credential = config.credential();
        if credential.is_valid() {
            return Ok(credential.access_token);
        }

        let credential = self.login(&mut config).await?;
        Ok(credential.access_token)
    }

    /// Log in unconditionally and persist the new credential
    pub async fn refresh(&self) -> Result<Credential> {
        let mut config = self.config.write().await;
        self.login(&mut config).await
    }

    /// `Authorization` header carrying a fresh token
    pub async fn auth_header(&self) -> Result<StringMap> {
        let token = self.ensure_fresh().await?;
        let mut headers = StringMap::new();
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        Ok(headers)
    }

    /// Apply the bearer token to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.ensure_fresh().await?;
        Ok(req.bearer_auth(token))
    }

    /// Call the login endpoint, update `config` and write it to the store.
    ///
    /// Must be called with the config write lock held.
    async fn login(&self, config: &mut TapConfig) -> Result<Credential> {
        debug!("Requesting new access token from {}", self.token_url);
        let requested_at = Utc::now().timestamp();

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&config.login_form())
            .send()
            .await
            .map_err(|e| Error::auth(format!("Login request to {} failed: {e}", self.token_url)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::auth(format!("Failed to read login response: {e}")))?;

        if !status.is_success() {
            return Err(Error::auth(format!(
                "Login failed with status {}, response was '{body}'",
                status.as_u16()
            )));
        }

        let parsed: LoginResponse = serde_json::from_str(&body).map_err(|e| {
            Error::auth(format!("Malformed login response '{body}': {e}"))
        })?;

        let credential = Credential::new(
            parsed.data.token.jwt_token,
            parsed.data.token.expires_in,
            requested_at,
        );
        config.set_credential(&credential);
        self.store.save(config).await?;

        info!(
            "Login succeeded, token valid for {}s",
            credential.expires_in
        );
        Ok(credential)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

/// Login endpoint response envelope
#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: LoginToken,
}

#[derive(Debug, Deserialize)]
struct LoginToken {
    jwt_token: String,
    expires_in: i64,
}
