use crate::core::{AppError, Result};
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;

/// Build the HTTP client shared by the token manager and the H2H client
pub fn build_http_client(timeout: Duration, tls_verify: bool) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(!tls_verify)
        .build()
        .map_err(AppError::HttpClient)
}

/// POST a JSON body and return the response object.
///
/// Non-2xx statuses become [`AppError::HttpStatus`] carrying the parsed body
/// (empty object when the body is not a JSON object). A 2xx body that is not a
/// JSON object yields an empty map.
pub async fn post_json(
    client: &Client,
    url: &str,
    payload: &Value,
    headers: &[(&str, &str)],
) -> Result<Map<String, Value>> {
    let mut request = client
        .post(url)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json");
    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    let response = request.json(payload).send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            let reason = if e.is_timeout() {
                "timeout"
            } else {
                "connection failed"
            };
            tracing::error!(url = %url, reason, "BNI H2H gateway unavailable");
        }
        AppError::HttpClient(e)
    })?;

    let status = response.status();
    let body = response.text().await?;
    let parsed = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    if !status.is_success() {
        tracing::warn!(url = %url, status = status.as_u16(), "BNI H2H request failed");
        return Err(AppError::http_status(status.as_u16(), Value::Object(parsed)));
    }

    Ok(parsed)
}

/// `responseCode` of a response body. Strings are taken verbatim, other
/// scalars through their JSON text; a missing or null code is `None`.
pub(crate) fn response_code(body: &Map<String, Value>) -> Option<String> {
    match body.get("responseCode")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
