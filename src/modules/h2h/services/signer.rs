use crate::core::encoding::{base64url_encode, to_ascii_json};
use crate::core::{AppError, Result};
use hmac::{Hmac, Mac};
use serde_json::{json, Map, Value};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Build an HS256 compact token (`header.payload.signature`) over `payload`.
///
/// Sign-only: inbound tokens are never verified on this side.
pub fn sign(payload: &Map<String, Value>, secret: &str) -> Result<String> {
    let header = json!({"alg": "HS256", "typ": "JWT"});

    let header_segment = base64url_encode(to_ascii_json(&header).as_bytes());
    let payload_segment =
        base64url_encode(to_ascii_json(&Value::Object(payload.clone())).as_bytes());
    let signing_input = format!("{}.{}", header_segment, payload_segment);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::internal(format!("Invalid HMAC key: {}", e)))?;
    mac.update(signing_input.as_bytes());
    let signature = base64url_encode(&mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}
