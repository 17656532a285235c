use super::gateway_trait::{H2hGateway, H2hPayload};
use super::reference::{self, CUSTOMER_REFERENCE_PREFIX};
use super::sanitizer::sanitize_map;
use super::signer::sign;
use super::token_cache::{MokaTokenCache, TokenCache};
use super::token_manager::TokenManager;
use super::transport::{build_http_client, post_json, response_code};
use crate::core::error::UNKNOWN_RESPONSE_CODE;
use crate::core::{AppError, Clock, Result, SystemClock};
use crate::modules::h2h::models::{H2hCredential, H2hEndpoint};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// The single `responseCode` that denotes success
pub const SUCCESS_RESPONSE_CODE: &str = "0001";

/// Signed, bearer-authenticated client for the BNI H2H v2 API
pub struct H2hClient {
    client: Client,
    credential: Arc<H2hCredential>,
    tokens: TokenManager,
    clock: Arc<dyn Clock>,
}

impl H2hClient {
    /// Client with a private in-process token cache and the system clock
    pub fn new(credential: H2hCredential) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let cache = Arc::new(MokaTokenCache::with_clock(clock.clone()));
        Self::with_parts(credential, cache, clock)
    }

    /// Client sharing `cache` with other clients, driven by `clock`
    pub fn with_parts(
        credential: H2hCredential,
        cache: Arc<dyn TokenCache>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        credential.validate()?;

        let client = build_http_client(credential.timeout, credential.tls_verify)?;
        let credential = Arc::new(credential);
        let tokens = TokenManager::new(client.clone(), credential.clone(), cache, clock.clone());

        Ok(Self {
            client,
            credential,
            tokens,
            clock,
        })
    }

    /// Scope the shared token cache entry, see [`TokenManager::with_cache_key`]
    pub fn with_token_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.tokens = self.tokens.with_cache_key(cache_key);
        self
    }

    pub fn credential(&self) -> &H2hCredential {
        &self.credential
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    /// Execute one signed call against `endpoint`
    pub async fn call(&self, endpoint: H2hEndpoint, payload: H2hPayload) -> Result<H2hPayload> {
        self.call_path(endpoint.path(), payload).await
    }

    /// Execute one signed call against an arbitrary endpoint path
    pub async fn call_path(&self, path: &str, payload: H2hPayload) -> Result<H2hPayload> {
        let token = self.tokens.get_token(false).await?;
        let derived_client_id = self.credential.derived_client_id();

        let sanitized = sanitize_map(payload);

        let mut signing_payload = sanitized.clone();
        signing_payload.insert("clientId".into(), Value::from(derived_client_id.as_str()));
        let signature = sign(&signing_payload, &self.credential.api_secret)?;

        let mut request_payload = sanitized;
        request_payload.insert("signature".into(), Value::from(signature));

        let url = self.credential.endpoint_url(path);
        let authorization = format!("Bearer {}", token);

        info!(endpoint = %path, "Sending signed BNI H2H request");

        let response = post_json(
            &self.client,
            &url,
            &Value::Object(request_payload),
            &[
                ("Authorization", authorization.as_str()),
                ("x-api-key", self.credential.api_key.as_str()),
                ("x-client-id", derived_client_id.as_str()),
            ],
        )
        .await?;

        assert_api_success(path, response)
    }
}

fn assert_api_success(path: &str, response: H2hPayload) -> Result<H2hPayload> {
    match response_code(&response) {
        Some(code) if code == SUCCESS_RESPONSE_CODE => {
            info!(endpoint = %path, response_code = %code, "BNI H2H request succeeded");
            Ok(response)
        }
        code => {
            let code = code.unwrap_or_else(|| UNKNOWN_RESPONSE_CODE.to_string());
            error!(endpoint = %path, response_code = %code, "BNI H2H request rejected");
            let message = format!("BNI H2H API returned responseCode {}", code);
            Err(AppError::api(code, Value::Object(response), message))
        }
    }
}

#[async_trait]
impl H2hGateway for H2hClient {
    async fn get_oauth_token(&self, force_refresh: bool) -> Result<String> {
        self.tokens.get_token(force_refresh).await
    }

    async fn get_inhouse_inquiry(&self, payload: H2hPayload) -> Result<H2hPayload> {
        self.call(H2hEndpoint::InhouseInquiry, payload).await
    }

    async fn get_interbank_inquiry(&self, payload: H2hPayload) -> Result<H2hPayload> {
        self.call(H2hEndpoint::InterbankInquiry, payload).await
    }

    async fn do_payment(&self, payload: H2hPayload) -> Result<H2hPayload> {
        self.call(H2hEndpoint::DoPayment, payload).await
    }

    async fn get_payment_status(&self, payload: H2hPayload) -> Result<H2hPayload> {
        self.call(H2hEndpoint::PaymentStatus, payload).await
    }

    fn make_customer_reference_number(&self) -> String {
        reference::generate(CUSTOMER_REFERENCE_PREFIX, self.clock.as_ref())
    }
}
