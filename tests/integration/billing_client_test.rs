//! eCollection (Billing) calls against a stand-in BNI endpoint
//!
//! The stand-in decrypts what the client sends and encrypts what it answers
//! with the same keys, as the bank does.

#[path = "../helpers/mod.rs"]
mod helpers;

use bni_bridge::billing::{BillingResponse, CreateBilling, UpdateBilling};
use bni_bridge::core::MockClock;
use bni_bridge::AppError;
use helpers::*;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Decrypted inner payload of the single billing request the server received
async fn sent_payload(server: &MockServer, clock: &MockClock) -> Value {
    let requests = requests_to(server, BILLING_PATH).await;
    assert_eq!(requests.len(), 1);

    let envelope = json_body(&requests[0]);
    let data = envelope["data"].as_str().expect("data must be a string");
    bank_codec(clock).decode(data).expect("bank must decrypt the request")
}

async fn mount_billing_success(server: &MockServer, clock: &MockClock, data: Value) {
    let body = json!({"status": "000", "data": bank_codec(clock).encode(&data)});
    mount_json(server, BILLING_PATH, 200, body).await;
}

#[tokio::test]
async fn test_create_billing_round_trip() {
    let server = MockServer::start().await;
    let clock = MockClock::starting_now();
    let data = json!({"virtual_account": "8001000000000001", "trx_id": "INV-001"});
    mount_billing_success(&server, &clock, data.clone()).await;

    let request = CreateBilling {
        customer_email: Some("budi@email.com".into()),
        customer_phone: Some("08123123123".into()),
        datetime_expired: Some("2025-11-08 23:59:59".into()),
        description: Some("Invoice INV-001".into()),
        ..CreateBilling::new("INV-001", "100000", "c", "Budi Santoso")
    };
    let response = billing_client(&server, &clock)
        .create_billing(&request)
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.data(), Some(&data));
    assert_eq!(
        sent_payload(&server, &clock).await,
        json!({
            "type": "createbilling",
            "client_id": BILLING_CLIENT_ID,
            "trx_id": "INV-001",
            "trx_amount": "100000",
            "billing_type": "c",
            "customer_name": "Budi Santoso",
            "customer_email": "budi@email.com",
            "customer_phone": "08123123123",
            "datetime_expired": "2025-11-08 23:59:59",
            "description": "Invoice INV-001",
        })
    );
}

#[tokio::test]
async fn test_outer_envelope_shape() {
    let server = MockServer::start().await;
    let clock = MockClock::starting_now();
    mount_billing_success(&server, &clock, json!({"trx_id": "INV-001"})).await;

    billing_client(&server, &clock)
        .inquire_billing("INV-001")
        .await
        .unwrap();

    let requests = requests_to(&server, BILLING_PATH).await;
    let body = json_body(&requests[0]);
    let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();

    assert_eq!(keys, vec!["client_id", "prefix", "data"]);
    assert_eq!(body["client_id"], BILLING_CLIENT_ID);
    assert_eq!(body["prefix"], BILLING_PREFIX);
    assert_eq!(header(&requests[0], "content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_create_without_optionals_sends_no_optional_keys() {
    let server = MockServer::start().await;
    let clock = MockClock::starting_now();
    mount_billing_success(&server, &clock, json!({"trx_id": "INV-002"})).await;

    billing_client(&server, &clock)
        .create_billing(&CreateBilling::new("INV-002", "50000", "o", "Siti Aminah"))
        .await
        .unwrap();

    let sent = sent_payload(&server, &clock).await;
    let sent = sent.as_object().unwrap();
    for key in [
        "customer_email",
        "customer_phone",
        "virtual_account",
        "datetime_expired",
        "description",
    ] {
        assert!(!sent.contains_key(key), "unexpected key {}", key);
    }
    assert_eq!(sent.len(), 6);
}

#[tokio::test]
async fn test_send_sms_selects_sms_operation() {
    let server = MockServer::start().await;
    let clock = MockClock::starting_now();
    mount_billing_success(&server, &clock, json!({"trx_id": "INV-003"})).await;

    let request = CreateBilling {
        send_sms: true,
        customer_phone: Some("08123123123".into()),
        ..CreateBilling::new("INV-003", "75000", "c", "Budi Santoso")
    };
    billing_client(&server, &clock)
        .create_billing(&request)
        .await
        .unwrap();

    assert_eq!(sent_payload(&server, &clock).await["type"], "createbillingsms");
}

#[tokio::test]
async fn test_update_billing_payload() {
    let server = MockServer::start().await;
    let clock = MockClock::starting_now();
    mount_billing_success(&server, &clock, json!({"trx_id": "INV-001"})).await;

    let request = UpdateBilling {
        description: Some("Updated".into()),
        ..UpdateBilling::new("INV-001", "200000", "Budi Santoso")
    };
    billing_client(&server, &clock)
        .update_billing(&request)
        .await
        .unwrap();

    assert_eq!(
        sent_payload(&server, &clock).await,
        json!({
            "type": "updatebilling",
            "client_id": BILLING_CLIENT_ID,
            "trx_id": "INV-001",
            "trx_amount": "200000",
            "customer_name": "Budi Santoso",
            "description": "Updated",
        })
    );
}

#[tokio::test]
async fn test_inquire_billing_payload() {
    let server = MockServer::start().await;
    let clock = MockClock::starting_now();
    let data = json!({
        "trx_id": "INV-001",
        "trx_amount": "100000",
        "va_status": "1",
        "payment_amount": "0",
    });
    mount_billing_success(&server, &clock, data.clone()).await;

    let response = billing_client(&server, &clock)
        .inquire_billing("INV-001")
        .await
        .unwrap();

    assert_eq!(response.data(), Some(&data));
    assert_eq!(
        sent_payload(&server, &clock).await,
        json!({"type": "inquirybilling", "client_id": BILLING_CLIENT_ID, "trx_id": "INV-001"})
    );
}

#[tokio::test]
async fn test_failure_status_passes_through() {
    let server = MockServer::start().await;
    let clock = MockClock::starting_now();
    let body = json!({"status": "102", "message": "Billing not found"});
    mount_json(&server, BILLING_PATH, 200, body.clone()).await;

    let response = billing_client(&server, &clock)
        .inquire_billing("INV-404")
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(response.status(), Some("102"));
    assert_eq!(response, BillingResponse::Other(body));
}

#[tokio::test]
async fn test_http_status_is_not_inspected() {
    let server = MockServer::start().await;
    let clock = MockClock::starting_now();
    let body = json!({"status": "999", "message": "Internal error"});
    mount_json(&server, BILLING_PATH, 500, body.clone()).await;

    let response = billing_client(&server, &clock)
        .inquire_billing("INV-001")
        .await
        .unwrap();

    assert_eq!(response.into_value(), body);
}

#[tokio::test]
async fn test_stale_response_data_is_null() {
    let server = MockServer::start().await;
    let clock = MockClock::starting_now();
    mount_billing_success(&server, &clock, json!({"trx_id": "INV-001"})).await;

    // Response envelope is stamped at mount time
    clock.advance(chrono::Duration::seconds(481));

    let response = billing_client(&server, &clock)
        .inquire_billing("INV-001")
        .await
        .unwrap();

    assert_eq!(response, BillingResponse::Success { data: None });
}

#[tokio::test]
async fn test_non_json_body_is_error() {
    let server = MockServer::start().await;
    let clock = MockClock::starting_now();
    Mock::given(method("POST"))
        .and(path(BILLING_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = billing_client(&server, &clock)
        .inquire_billing("INV-001")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Json(_)));
}
