use crate::core::{AppError, Result};

/// Credentials for the eCollection (Billing) API
#[derive(Clone)]
pub struct BillingCredential {
    pub client_id: String,
    /// Shared secret, treated as an opaque byte string
    pub secret_key: String,
    /// Virtual-account prefix assigned by the bank
    pub va_prefix: String,
    pub endpoint_url: String,
}

impl BillingCredential {
    pub fn new(
        client_id: impl Into<String>,
        secret_key: impl Into<String>,
        va_prefix: impl Into<String>,
        endpoint_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            secret_key: secret_key.into(),
            va_prefix: va_prefix.into(),
            endpoint_url: endpoint_url.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(AppError::configuration("Billing client_id must not be empty"));
        }
        if self.secret_key.is_empty() {
            return Err(AppError::configuration("Billing secret_key must not be empty"));
        }
        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            return Err(AppError::configuration(format!(
                "Billing endpoint URL must be http(s), got '{}'",
                self.endpoint_url
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for BillingCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingCredential")
            .field("client_id", &self.client_id)
            .field("secret_key", &"<redacted>")
            .field("va_prefix", &self.va_prefix)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}
