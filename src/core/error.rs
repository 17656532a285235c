use serde_json::Value;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Response code reported when the bank gives no usable `responseCode`
pub const UNKNOWN_RESPONSE_CODE: &str = "UNKNOWN";

/// Response code reported when the OAuth response carries no `access_token`
pub const TOKEN_MISSING_CODE: &str = "TOKEN_MISSING";

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Invalid input supplied by the caller
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The bank answered with a non-2xx HTTP status
    #[error("BNI request failed with HTTP status {status}")]
    HttpStatus {
        status: u16,
        /// Parsed response body, or an empty object when the body was not JSON
        body: Value,
    },

    /// The exchange succeeded at the HTTP level but the bank reported a
    /// non-success business code
    #[error("{message}")]
    Api {
        code: String,
        body: Value,
        message: String,
    },

    /// HTTP client errors (connection, timeout, TLS)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn http_status(status: u16, body: Value) -> Self {
        AppError::HttpStatus { status, body }
    }

    /// Business error carrying the bank's response code and full body
    pub fn api(code: impl Into<String>, body: Value, message: impl Into<String>) -> Self {
        AppError::Api {
            code: code.into(),
            body,
            message: message.into(),
        }
    }

    /// HTTP status of a transport error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::HttpStatus { status, .. } => Some(*status),
            AppError::HttpClient(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Business response code of an API error
    pub fn response_code(&self) -> Option<&str> {
        match self {
            AppError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Raw response body attached to a transport or business error
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            AppError::HttpStatus { body, .. } | AppError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::HttpStatus { .. } | AppError::HttpClient(_))
    }

    pub fn is_business(&self) -> bool {
        matches!(self, AppError::Api { .. })
    }
}
