use serde_json::{Map, Value};

/// Characters stripped from both ends of every string value
const TRIM_CHARS: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Trim every string in a JSON value, recursing into objects and arrays.
///
/// Keys and element order are preserved; numbers, booleans and null pass
/// through unchanged. Idempotent.
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(trim(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize).collect()),
        Value::Object(map) => Value::Object(sanitize_map(map)),
        other => other,
    }
}

/// [`sanitize`] applied to each value of a payload object
pub fn sanitize_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter().map(|(k, v)| (k, sanitize(v))).collect()
}

fn trim(s: &str) -> String {
    s.trim_matches(TRIM_CHARS.as_slice()).to_string()
}
