use super::codec::BillingCodec;
use crate::core::{AppError, Clock, Result, SystemClock};
use crate::modules::billing::models::billing_request::inquiry_payload;
use crate::modules::billing::models::{
    BillingCredential, BillingResponse, CreateBilling, UpdateBilling, SUCCESS_STATUS,
};
use reqwest::Client;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Client for the BNI eCollection (virtual-account Billing) API
///
/// Every call encrypts a flat payload with [`BillingCodec`], posts it as
/// `{client_id, prefix, data}` to the single Billing endpoint and decrypts
/// the `data` of a `"000"` response.
pub struct BillingClient {
    client: Client,
    credential: BillingCredential,
    codec: BillingCodec,
}

impl BillingClient {
    pub fn new(credential: BillingCredential) -> Result<Self> {
        Self::with_clock(credential, Arc::new(SystemClock))
    }

    pub fn with_clock(credential: BillingCredential, clock: Arc<dyn Clock>) -> Result<Self> {
        credential.validate()?;

        let codec = BillingCodec::with_clock(
            credential.client_id.clone(),
            credential.secret_key.clone(),
            clock,
        )?;

        Ok(Self {
            client: Client::new(),
            credential,
            codec,
        })
    }

    pub fn codec(&self) -> &BillingCodec {
        &self.codec
    }

    /// Create a billing (`createbilling`, or `createbillingsms` when
    /// `send_sms` is set)
    pub async fn create_billing(&self, request: &CreateBilling) -> Result<BillingResponse> {
        info!(
            trx_id = %request.trx_id,
            operation = %request.operation(),
            "Creating BNI billing"
        );
        self.send_encrypted(request.to_payload(&self.credential.client_id))
            .await
    }

    /// Update an existing billing
    pub async fn update_billing(&self, request: &UpdateBilling) -> Result<BillingResponse> {
        info!(trx_id = %request.trx_id, "Updating BNI billing");
        self.send_encrypted(request.to_payload(&self.credential.client_id))
            .await
    }

    /// Inquire the state of a billing
    pub async fn inquire_billing(&self, trx_id: &str) -> Result<BillingResponse> {
        info!(trx_id = %trx_id, "Inquiring BNI billing");
        self.send_encrypted(inquiry_payload(&self.credential.client_id, trx_id))
            .await
    }

    async fn send_encrypted(&self, payload: Map<String, Value>) -> Result<BillingResponse> {
        let envelope = self.codec.encode(&Value::Object(payload));

        let request_body = json!({
            "client_id": self.credential.client_id,
            "prefix": self.credential.va_prefix,
            "data": envelope,
        });

        let response = self
            .client
            .post(&self.credential.endpoint_url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "BNI billing request failed");
                AppError::HttpClient(e)
            })?;

        let http_status = response.status();
        let body = response.text().await?;
        let parsed: Value = serde_json::from_str(&body)?;

        debug!(
            http_status = http_status.as_u16(),
            status = ?parsed.get("status"),
            "BNI billing response received"
        );

        Ok(self.interpret(parsed))
    }

    fn interpret(&self, response: Value) -> BillingResponse {
        let is_success = response.get("status").and_then(Value::as_str) == Some(SUCCESS_STATUS);

        match response.get("data").and_then(Value::as_str) {
            Some(envelope) if is_success => {
                let data = self.codec.decode(envelope);
                if data.is_none() {
                    warn!("BNI billing response data could not be decoded");
                }
                BillingResponse::Success { data }
            }
            _ => BillingResponse::Other(response),
        }
    }
}
