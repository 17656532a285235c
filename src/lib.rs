//! BNI Bridge Library
//!
//! Protocol layer for BNI's two payment APIs: the eCollection (virtual-account
//! Billing) API protected by an envelope codec, and the H2H v2 API protected
//! by OAuth2 client credentials plus per-request HMAC signatures.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use core::{AppError, Result};
pub use modules::billing;
pub use modules::h2h;
