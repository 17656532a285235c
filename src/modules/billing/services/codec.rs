use crate::core::encoding::{base64url_decode, base64url_encode, to_ascii_json};
use crate::core::{AppError, Clock, Result, SystemClock};
use serde_json::Value;
use std::sync::Arc;

/// Maximum distance, in seconds, between the timestamp embedded in an
/// envelope and the local clock for the envelope to be accepted
pub const TIME_DIFF_LIMIT: i64 = 480;

/// Envelope codec for the BNI eCollection (Billing) API
///
/// This is the counterpart's fixed obfuscation scheme, not encryption: a
/// double-keyed additive byte cipher modulo 128 with an embedded, digit-reversed
/// Unix timestamp. It must stay byte-compatible with the bank, including the
/// shifted key index in [`keyed_transform`].
#[derive(Clone)]
pub struct BillingCodec {
    client_id: Vec<u8>,
    secret_key: Vec<u8>,
    clock: Arc<dyn Clock>,
}

impl BillingCodec {
    /// Create a codec keyed by the client id and shared secret
    pub fn new(client_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::with_clock(client_id, secret_key, Arc::new(SystemClock))
    }

    /// Create a codec with an injected clock
    pub fn with_clock(
        client_id: impl Into<String>,
        secret_key: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let client_id = client_id.into().into_bytes();
        let secret_key = secret_key.into().into_bytes();

        if client_id.is_empty() {
            return Err(AppError::validation("Billing client_id must not be empty"));
        }
        if secret_key.is_empty() {
            return Err(AppError::validation("Billing secret_key must not be empty"));
        }

        Ok(Self {
            client_id,
            secret_key,
            clock,
        })
    }

    /// Encode a payload into a base64url envelope stamped with the current time
    pub fn encode(&self, payload: &Value) -> String {
        let reversed_timestamp: String = self.clock.unix_timestamp().to_string().chars().rev().collect();
        let plain = format!("{}.{}", reversed_timestamp, to_ascii_json(payload));

        let once = keyed_transform(plain.as_bytes(), &self.client_id, Direction::Encode);
        let twice = keyed_transform(&once, &self.secret_key, Direction::Encode);

        base64url_encode(&twice)
    }

    /// Decode an envelope back into its payload.
    ///
    /// Returns `None` when the envelope is malformed, was produced with other
    /// keys, is outside the replay window, or does not hold a JSON object or
    /// array. The cause is deliberately not distinguished.
    pub fn decode(&self, envelope: &str) -> Option<Value> {
        let bytes = base64url_decode(envelope)?;

        // Same key order as encode; the additive transform commutes
        let once = keyed_transform(&bytes, &self.client_id, Direction::Decode);
        let twice = keyed_transform(&once, &self.secret_key, Direction::Decode);

        // Every byte is < 128 after the transform, so this is ASCII
        let plain = String::from_utf8(twice).ok()?;
        let (reversed_timestamp, json) = plain.split_once('.')?;

        let timestamp: i64 = reversed_timestamp.chars().rev().collect::<String>().parse().ok()?;
        // abs_diff cannot overflow for timestamps near i64::MIN/MAX
        let skew = timestamp.abs_diff(self.clock.unix_timestamp());
        if skew > TIME_DIFF_LIMIT.unsigned_abs() {
            tracing::debug!(skew_seconds = skew, "Billing envelope outside replay window");
            return None;
        }

        match serde_json::from_str::<Value>(json).ok()? {
            value @ (Value::Object(_) | Value::Array(_)) => Some(value),
            _ => None,
        }
    }
}

impl std::fmt::Debug for BillingCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingCodec")
            .field("client_id", &String::from_utf8_lossy(&self.client_id))
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Encode,
    Decode,
}

/// Apply the keyed byte transform.
///
/// For input position `i` the key byte is `key[(i % len) - 1]`, where index
/// `-1` wraps to the last key byte. Encoding adds the key byte modulo 128;
/// decoding subtracts it (`+ 256` keeps the operand positive).
fn keyed_transform(input: &[u8], key: &[u8], direction: Direction) -> Vec<u8> {
    let key_len = key.len();
    input
        .iter()
        .enumerate()
        .map(|(i, &byte)| {
            let position = i % key_len;
            let key_byte = if position == 0 {
                key[key_len - 1]
            } else {
                key[position - 1]
            };
            match direction {
                Direction::Encode => ((u16::from(byte) + u16::from(key_byte)) % 128) as u8,
                Direction::Decode => {
                    ((i16::from(byte) - i16::from(key_byte) + 256) % 128) as u8
                }
            }
        })
        .collect()
}
