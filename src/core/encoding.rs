//! Wire encodings shared by the Billing codec and the H2H signer.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde_json::Value;
use std::fmt::Write;

/// Serialize a JSON value the way the bank's counterpart encoder does:
/// object key order is preserved and every non-ASCII character is written as
/// a `\uXXXX` escape (UTF-16 surrogate pairs above the BMP).
///
/// The output is pure ASCII.
pub fn to_ascii_json(value: &Value) -> String {
    let raw = value.to_string();
    if raw.is_ascii() {
        return raw;
    }

    let mut out = String::with_capacity(raw.len() + 16);
    for ch in raw.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        let mut units = [0u16; 2];
        for unit in ch.encode_utf16(&mut units) {
            // Writing to a String cannot fail
            let _ = write!(out, "\\u{:04x}", unit);
        }
    }
    out
}

/// Base64url without padding (`+/` replaced by `-_`, trailing `=` stripped)
pub fn base64url_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode base64url, re-padding to a multiple of four first.
///
/// Returns `None` on malformed input.
pub fn base64url_decode(input: &str) -> Option<Vec<u8>> {
    let mut padded: String = input
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    STANDARD.decode(padded).ok()
}

/// Plain (padded) base64, used for the derived client identifier
pub fn base64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
