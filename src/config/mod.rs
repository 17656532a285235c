use crate::core::{AppError, Result};
use crate::modules::billing::BillingCredential;
use crate::modules::h2h::models::credential::default_oauth_url;
use crate::modules::h2h::models::{
    H2hCredential, DEFAULT_CLIENT_ID_PREFIX, DEFAULT_TIMEOUT_SECONDS,
};
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub billing: BillingConfig,
    pub payment: PaymentConfig,
}

/// eCollection (Billing) settings
#[derive(Clone)]
pub struct BillingConfig {
    pub client_id: String,
    pub secret_key: String,
    pub prefix: String,
    pub url: String,
}

/// H2H v2 payment settings
#[derive(Clone)]
pub struct PaymentConfig {
    pub base_url: String,
    pub oauth_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub api_key: String,
    pub api_secret: String,
    pub client_name: String,
    pub client_id_prefix: String,
    pub timeout_seconds: u64,
    pub verify_ssl: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            billing: BillingConfig::from_env()?,
            payment: PaymentConfig::from_env()?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.billing.validate()?;
        self.payment.validate()
    }
}

impl BillingConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(BillingConfig {
            client_id: required("BNI_BILLING_CLIENT_ID")?,
            secret_key: required("BNI_BILLING_SECRET_KEY")?,
            prefix: required("BNI_BILLING_PREFIX")?,
            url: env::var("BNI_BILLING_URL").unwrap_or_default(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.credential().validate()
    }

    pub fn credential(&self) -> BillingCredential {
        BillingCredential::new(
            self.client_id.clone(),
            self.secret_key.clone(),
            self.prefix.clone(),
            self.url.clone(),
        )
    }
}

impl PaymentConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = required("BNI_PAYMENT_BASE_URL")?;
        let oauth_url =
            env::var("BNI_PAYMENT_OAUTH_URL").unwrap_or_else(|_| default_oauth_url(&base_url));

        Ok(PaymentConfig {
            base_url,
            oauth_url,
            client_id: required("BNI_PAYMENT_CLIENT_ID")?,
            client_secret: required("BNI_PAYMENT_CLIENT_SECRET")?,
            api_key: required("BNI_PAYMENT_API_KEY")?,
            api_secret: required("BNI_PAYMENT_API_SECRET")?,
            client_name: required("BNI_PAYMENT_CLIENT_NAME")?,
            client_id_prefix: env::var("BNI_PAYMENT_CLIENT_ID_PREFIX")
                .unwrap_or_else(|_| DEFAULT_CLIENT_ID_PREFIX.to_string()),
            timeout_seconds: env::var("BNI_PAYMENT_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECONDS.to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid BNI_PAYMENT_TIMEOUT_SECONDS".to_string())
                })?,
            verify_ssl: match env::var("BNI_PAYMENT_VERIFY_SSL") {
                Ok(raw) => parse_bool(&raw).ok_or_else(|| {
                    AppError::Configuration("Invalid BNI_PAYMENT_VERIFY_SSL".to_string())
                })?,
                Err(_) => true,
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.credential().validate()
    }

    pub fn credential(&self) -> H2hCredential {
        H2hCredential::new(
            self.base_url.clone(),
            self.client_id.clone(),
            self.client_secret.clone(),
            self.api_key.clone(),
            self.api_secret.clone(),
            self.client_name.clone(),
        )
        .with_oauth_url(self.oauth_url.clone())
        .with_client_id_prefix(self.client_id_prefix.clone())
        .with_timeout(Duration::from_secs(self.timeout_seconds))
        .with_tls_verify(self.verify_ssl)
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| AppError::Configuration(format!("{} not set", name)))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl std::fmt::Debug for BillingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.credential(), f)
    }
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.credential(), f)
    }
}
