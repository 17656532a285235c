//! Signed H2H v2 calls against a stand-in BNI gateway
//!
//! Verifies the wire format of a signed request (headers, sanitized body,
//! signature), endpoint routing, and how transport and business failures
//! surface.

#[path = "../helpers/mod.rs"]
mod helpers;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bni_bridge::core::MockClock;
use bni_bridge::h2h::services::sign;
use bni_bridge::h2h::{H2hEndpoint, H2hGateway, H2hPayload, MokaTokenCache, TokenCache};
use bni_bridge::AppError;
use helpers::*;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn payload(value: Value) -> H2hPayload {
    match value {
        Value::Object(map) => map,
        _ => panic!("payload must be an object"),
    }
}

fn payment_request() -> H2hPayload {
    payload(json!({
        "customerReferenceNumber": "CRN20251101170000123456",
        "amount": 100000,
        "creditAccountNo": " 0115476117 ",
        "notes": {"description": "\tpay rent\n", "tags": [" a ", "b\r\n"]},
    }))
}

fn success_body() -> Value {
    json!({"responseCode": "0001", "responseMessage": "Request has been processed successfully"})
}

#[tokio::test]
async fn test_signed_request_wire_format() {
    let server = MockServer::start().await;
    mount_oauth_token(&server, "access-123", 1).await;
    mount_json(&server, H2hEndpoint::DoPayment.path(), 200, success_body()).await;

    let clock = MockClock::starting_now();
    let response = h2h_client(&server, &clock)
        .do_payment(payment_request())
        .await
        .unwrap();
    assert_eq!(Value::Object(response), success_body());

    let requests = requests_to(&server, H2hEndpoint::DoPayment.path()).await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    assert_eq!(header(request, "authorization"), Some("Bearer access-123"));
    assert_eq!(header(request, "x-api-key"), Some(H2H_API_KEY));
    assert_eq!(header(request, "x-client-id"), Some(DERIVED_CLIENT_ID));
    assert_eq!(header(request, "accept"), Some("application/json"));
    assert_eq!(header(request, "content-type"), Some("application/json"));

    let body = json_body(request);
    let body = body.as_object().unwrap();

    // Trimmed at every depth; clientId is signed but never sent
    assert_eq!(body["creditAccountNo"], "0115476117");
    assert_eq!(body["amount"], 100000);
    assert_eq!(body["notes"], json!({"description": "pay rent", "tags": ["a", "b"]}));
    assert!(!body.contains_key("clientId"));

    let keys: Vec<&str> = body.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["customerReferenceNumber", "amount", "creditAccountNo", "notes", "signature"]
    );
}

#[tokio::test]
async fn test_signature_covers_payload_and_client_id() {
    let server = MockServer::start().await;
    mount_oauth_token(&server, "access-123", 1).await;
    mount_json(&server, H2hEndpoint::DoPayment.path(), 200, success_body()).await;

    let clock = MockClock::starting_now();
    h2h_client(&server, &clock)
        .do_payment(payment_request())
        .await
        .unwrap();

    let requests = requests_to(&server, H2hEndpoint::DoPayment.path()).await;
    let mut body = json_body(&requests[0]);
    let signature = body
        .as_object_mut()
        .unwrap()
        .remove("signature")
        .and_then(|s| s.as_str().map(str::to_owned))
        .expect("signature field");

    let parts: Vec<&str> = signature.split('.').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");

    let mut signed = payload(body);
    signed.insert("clientId".into(), Value::from(DERIVED_CLIENT_ID));
    let claims: Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
    assert_eq!(claims, Value::Object(signed.clone()));

    let mut mac = Hmac::<Sha256>::new_from_slice(H2H_API_SECRET.as_bytes()).unwrap();
    mac.update(format!("{}.{}", parts[0], parts[1]).as_bytes());
    mac.verify_slice(&URL_SAFE_NO_PAD.decode(parts[2]).unwrap())
        .expect("signature must verify with the API secret");

    assert_eq!(sign(&signed, H2H_API_SECRET).unwrap(), signature);
}

#[tokio::test]
async fn test_operations_route_to_their_endpoints() {
    let server = MockServer::start().await;
    mount_oauth_token(&server, "access-123", 1).await;
    for endpoint in [
        H2hEndpoint::InhouseInquiry,
        H2hEndpoint::InterbankInquiry,
        H2hEndpoint::DoPayment,
        H2hEndpoint::PaymentStatus,
    ] {
        mount_json(
            &server,
            endpoint.path(),
            200,
            json!({"responseCode": "0001", "endpoint": endpoint.path()}),
        )
        .await;
    }

    let clock = MockClock::starting_now();
    let client = h2h_client(&server, &clock);
    let request = || payload(json!({"accountNo": "0115476117"}));

    let inhouse = client.get_inhouse_inquiry(request()).await.unwrap();
    let interbank = client.get_interbank_inquiry(request()).await.unwrap();
    let payment = client.do_payment(request()).await.unwrap();
    let status = client.get_payment_status(request()).await.unwrap();

    assert_eq!(inhouse["endpoint"], "/H2H/v2/getinhouseinquiry");
    assert_eq!(interbank["endpoint"], "/H2H/v2/getinterbankinquiry");
    assert_eq!(payment["endpoint"], "/H2H/v2/dopayment");
    assert_eq!(status["endpoint"], "/H2H/v2/getpaymentstatus");

    // One token for all four calls
    assert_eq!(requests_to(&server, OAUTH_PATH).await.len(), 1);
}

#[tokio::test]
async fn test_http_error_status_is_transport_error() {
    let server = MockServer::start().await;
    mount_oauth_token(&server, "access-123", 1).await;
    mount_json(
        &server,
        H2hEndpoint::InhouseInquiry.path(),
        500,
        json!({"message": "server error"}),
    )
    .await;

    let clock = MockClock::starting_now();
    let err = h2h_client(&server, &clock)
        .get_inhouse_inquiry(payload(json!({"accountNo": "0115476117"})))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::HttpStatus { status: 500, .. }));
    assert_eq!(err.response_body().unwrap()["message"], "server error");
}

#[tokio::test]
async fn test_non_success_response_code_is_business_error() {
    let server = MockServer::start().await;
    mount_oauth_token(&server, "access-123", 1).await;
    mount_json(
        &server,
        H2hEndpoint::PaymentStatus.path(),
        200,
        json!({"responseCode": "9999", "message": "failed"}),
    )
    .await;

    let clock = MockClock::starting_now();
    let err = h2h_client(&server, &clock)
        .get_payment_status(payload(json!({"customerReferenceNumber": "CRN1"})))
        .await
        .unwrap_err();

    assert!(err.is_business());
    assert_eq!(err.response_code(), Some("9999"));
    assert_eq!(err.response_body().unwrap()["message"], "failed");
}

#[tokio::test]
async fn test_non_json_success_body_is_unknown_code() {
    let server = MockServer::start().await;
    mount_oauth_token(&server, "access-123", 1).await;
    Mock::given(method("POST"))
        .and(path(H2hEndpoint::DoPayment.path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let clock = MockClock::starting_now();
    let err = h2h_client(&server, &clock)
        .do_payment(payment_request())
        .await
        .unwrap_err();

    assert_eq!(err.response_code(), Some("UNKNOWN"));
    assert_eq!(err.response_body(), Some(&json!({})));
}

#[tokio::test]
async fn test_token_failure_stops_the_call() {
    let server = MockServer::start().await;
    mount_json(&server, OAUTH_PATH, 503, json!({"message": "unavailable"})).await;
    mount_json(&server, H2hEndpoint::DoPayment.path(), 200, success_body()).await;

    let clock = MockClock::starting_now();
    let err = h2h_client(&server, &clock)
        .do_payment(payment_request())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert!(requests_to(&server, H2hEndpoint::DoPayment.path()).await.is_empty());
}

#[tokio::test]
async fn test_request_timeout_is_transport_error() {
    let server = MockServer::start().await;
    mount_oauth_token(&server, "access-123", 1).await;
    Mock::given(method("POST"))
        .and(path(H2hEndpoint::DoPayment.path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let clock = Arc::new(MockClock::starting_now());
    let cache: Arc<dyn TokenCache> = Arc::new(MokaTokenCache::with_clock(clock.clone()));
    let credential = h2h_credential(&server).with_timeout(Duration::from_millis(300));
    let client = bni_bridge::h2h::H2hClient::with_parts(credential, cache, clock).unwrap();

    let err = client.do_payment(payment_request()).await.unwrap_err();

    match err {
        AppError::HttpClient(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_customer_reference_number_uses_bank_time() {
    let server = MockServer::start().await;
    let clock = MockClock::new(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2025, 11, 1, 10, 0, 0).unwrap(),
    );
    let reference = h2h_client(&server, &clock).make_customer_reference_number();

    assert!(reference.starts_with("CRN20251101170000"));
    assert_eq!(reference.len(), 23);
    assert!(reference[17..].chars().all(|c| c.is_ascii_digit()));
}
