use serde_json::{json, Value};

/// Status sentinel the eCollection API returns on success
pub const SUCCESS_STATUS: &str = "000";

/// Outcome of a Billing API call
///
/// A non-success status is not an error: the bank's response is handed back
/// untouched and the caller inspects its `status`.
#[derive(Debug, Clone, PartialEq)]
pub enum BillingResponse {
    /// `status == "000"` with an encrypted `data` field. `data` is `None`
    /// when the envelope could not be decoded.
    Success { data: Option<Value> },

    /// Any other response, passed through unmodified
    Other(Value),
}

impl BillingResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, BillingResponse::Success { .. })
    }

    /// Wire status of the response, if the bank sent one as a string
    pub fn status(&self) -> Option<&str> {
        match self {
            BillingResponse::Success { .. } => Some(SUCCESS_STATUS),
            BillingResponse::Other(raw) => raw.get("status").and_then(Value::as_str),
        }
    }

    /// Decrypted data of a successful response
    pub fn data(&self) -> Option<&Value> {
        match self {
            BillingResponse::Success { data } => data.as_ref(),
            BillingResponse::Other(_) => None,
        }
    }

    /// JSON view: `{"status": "000", "data": ...}` or the raw response
    pub fn into_value(self) -> Value {
        match self {
            BillingResponse::Success { data } => json!({
                "status": SUCCESS_STATUS,
                "data": data,
            }),
            BillingResponse::Other(raw) => raw,
        }
    }
}
