use crate::core::encoding::base64_encode;
use crate::core::{AppError, Result};
use std::time::Duration;

/// Default prefix of the derived client identifier
pub const DEFAULT_CLIENT_ID_PREFIX: &str = "IDBNI";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Credentials and transport settings for the H2H v2 API
#[derive(Clone)]
pub struct H2hCredential {
    pub base_url: String,
    pub oauth_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub api_key: String,
    /// HMAC key for request signatures
    pub api_secret: String,
    pub client_name: String,
    pub client_id_prefix: String,
    pub timeout: Duration,
    pub tls_verify: bool,
}

impl H2hCredential {
    /// Build a credential with default prefix, timeout and TLS verification.
    /// The OAuth URL defaults to `<base_url>/api/oauth/token`.
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        client_name: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        let oauth_url = default_oauth_url(&base_url);
        Self {
            base_url,
            oauth_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            client_name: client_name.into(),
            client_id_prefix: DEFAULT_CLIENT_ID_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            tls_verify: true,
        }
    }

    pub fn with_oauth_url(mut self, oauth_url: impl Into<String>) -> Self {
        self.oauth_url = oauth_url.into();
        self
    }

    pub fn with_client_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.client_id_prefix = prefix.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tls_verify(mut self, tls_verify: bool) -> Self {
        self.tls_verify = tls_verify;
        self
    }

    /// `client_id_prefix + base64(client_name)`, sent as `x-client-id` and
    /// embedded in every signed payload
    pub fn derived_client_id(&self) -> String {
        format!(
            "{}{}",
            self.client_id_prefix,
            base64_encode(self.client_name.as_bytes())
        )
    }

    /// Absolute URL of an endpoint path, joined with exactly one `/`
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("base_url", &self.base_url), ("oauth_url", &self.oauth_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::configuration(format!(
                    "H2H {} must be http(s), got '{}'",
                    name, url
                )));
            }
        }

        if self.timeout.is_zero() {
            return Err(AppError::configuration(
                "H2H timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}

pub fn default_oauth_url(base_url: &str) -> String {
    format!("{}/api/oauth/token", base_url)
}

impl std::fmt::Debug for H2hCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("H2hCredential")
            .field("base_url", &self.base_url)
            .field("oauth_url", &self.oauth_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("client_name", &self.client_name)
            .field("client_id_prefix", &self.client_id_prefix)
            .field("timeout", &self.timeout)
            .field("tls_verify", &self.tls_verify)
            .finish()
    }
}
