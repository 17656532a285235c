pub mod billing_client;
pub mod codec;

pub use billing_client::BillingClient;
pub use codec::{BillingCodec, TIME_DIFF_LIMIT};
