pub mod billing_request;
pub mod billing_response;
pub mod credential;

pub use billing_request::{BillingOperation, CreateBilling, UpdateBilling};
pub use billing_response::{BillingResponse, SUCCESS_STATUS};
pub use credential::BillingCredential;
