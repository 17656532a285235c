use super::token_cache::{TokenCache, OAUTH_TOKEN_CACHE_KEY};
use super::transport::{post_json, response_code};
use crate::core::error::TOKEN_MISSING_CODE;
use crate::core::{AppError, Clock, Result};
use crate::modules::h2h::models::{H2hCredential, OAuthToken};
use parking_lot::RwLock;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

/// OAuth2 client-credentials token lifecycle for the H2H API
///
/// Lookup order: the in-memory token, then the shared [`TokenCache`], then
/// the issuer. Concurrent callers may refresh at the same time; the last
/// writer wins and every fetched token stays usable for its own lifetime.
pub struct TokenManager {
    client: Client,
    credential: Arc<H2hCredential>,
    cache: Arc<dyn TokenCache>,
    clock: Arc<dyn Clock>,
    cache_key: String,
    current: RwLock<Option<OAuthToken>>,
}

impl TokenManager {
    pub fn new(
        client: Client,
        credential: Arc<H2hCredential>,
        cache: Arc<dyn TokenCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            credential,
            cache,
            clock,
            cache_key: OAUTH_TOKEN_CACHE_KEY.to_string(),
            current: RwLock::new(None),
        }
    }

    /// Use a different shared-cache key, needed when several credential sets
    /// share one cache
    pub fn with_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = cache_key.into();
        self
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Return a valid bearer token, fetching one if needed.
    ///
    /// `force_refresh` discards the shared cache entry and always asks the
    /// issuer for a new token.
    pub async fn get_token(&self, force_refresh: bool) -> Result<String> {
        let now = self.clock.now();

        if !force_refresh {
            if let Some(token) = self.current.read().as_ref() {
                if token.is_valid_at(now) {
                    return Ok(token.value.clone());
                }
            }

            if let Some(token) = self.cache.get(&self.cache_key) {
                debug!(cache_key = %self.cache_key, "Using shared OAuth token");
                let value = token.value.clone();
                *self.current.write() = Some(token);
                return Ok(value);
            }
        } else {
            info!(cache_key = %self.cache_key, "Forcing OAuth token refresh");
            self.cache.forget(&self.cache_key);
        }

        let token = self.fetch_token().await?;
        self.cache
            .put(&self.cache_key, token.clone(), token.remaining(self.clock.now()));
        let value = token.value.clone();
        *self.current.write() = Some(token);

        Ok(value)
    }

    async fn fetch_token(&self) -> Result<OAuthToken> {
        let credential = &self.credential;
        let derived_client_id = credential.derived_client_id();

        let payload = json!({
            "grant_type": "client_credentials",
            "client_id": credential.client_id,
            "client_secret": credential.client_secret,
        });

        let response = post_json(
            &self.client,
            &credential.oauth_url,
            &payload,
            &[
                ("x-api-key", credential.api_key.as_str()),
                ("x-client-id", derived_client_id.as_str()),
            ],
        )
        .await?;

        match response.get("access_token") {
            Some(Value::String(access_token)) => {
                let token = OAuthToken::issued_at(access_token.as_str(), self.clock.now());
                info!(expires_at = %token.expires_at, "Obtained BNI OAuth token");
                Ok(token)
            }
            _ => {
                let code = response_code(&response)
                    .unwrap_or_else(|| TOKEN_MISSING_CODE.to_string());
                error!(response_code = %code, "BNI OAuth response has no access_token");
                Err(AppError::api(
                    code,
                    Value::Object(response),
                    "BNI OAuth token response does not include access_token",
                ))
            }
        }
    }
}
