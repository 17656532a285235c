//! BNI eCollection (virtual-account Billing) integration.

pub mod models;
pub mod services;

pub use models::{BillingCredential, BillingOperation, BillingResponse, CreateBilling, UpdateBilling};
pub use services::{BillingClient, BillingCodec, TIME_DIFF_LIMIT};
