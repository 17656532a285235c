//! BNI H2H v2 payment integration (OAuth2 client credentials + HMAC-signed requests).

pub mod models;
pub mod services;

pub use models::{H2hCredential, H2hEndpoint, OAuthToken};
pub use services::{
    H2hClient, H2hGateway, H2hPayload, MokaTokenCache, TokenCache, TokenManager,
};
