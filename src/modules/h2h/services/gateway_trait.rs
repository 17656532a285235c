use crate::core::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Request or response body of a signed H2H call
pub type H2hPayload = Map<String, Value>;

/// BNI H2H v2 payment gateway
///
/// Every operation returns the bank's response body verbatim once its
/// `responseCode` is `"0001"`. Transport failures surface as
/// [`AppError::HttpStatus`](crate::core::AppError::HttpStatus) or
/// [`AppError::HttpClient`](crate::core::AppError::HttpClient), business
/// failures as [`AppError::Api`](crate::core::AppError::Api).
#[async_trait]
pub trait H2hGateway: Send + Sync {
    /// Current OAuth bearer token, optionally forcing a new one
    async fn get_oauth_token(&self, force_refresh: bool) -> Result<String>;

    /// Account inquiry within BNI
    async fn get_inhouse_inquiry(&self, payload: H2hPayload) -> Result<H2hPayload>;

    /// Account inquiry at another bank
    async fn get_interbank_inquiry(&self, payload: H2hPayload) -> Result<H2hPayload>;

    /// Execute a payment
    async fn do_payment(&self, payload: H2hPayload) -> Result<H2hPayload>;

    /// Status of a previously submitted payment
    async fn get_payment_status(&self, payload: H2hPayload) -> Result<H2hPayload>;

    /// Fresh customer reference number (`CRN` prefix)
    fn make_customer_reference_number(&self) -> String;
}
