pub mod gateway_trait;
pub mod h2h_client;
pub mod reference;
pub mod sanitizer;
pub mod signer;
pub mod token_cache;
pub mod token_manager;
pub mod transport;

pub use gateway_trait::{H2hGateway, H2hPayload};
pub use h2h_client::{H2hClient, SUCCESS_RESPONSE_CODE};
pub use sanitizer::{sanitize, sanitize_map};
pub use signer::sign;
pub use token_cache::{MokaTokenCache, TokenCache, OAUTH_TOKEN_CACHE_KEY};
pub use token_manager::TokenManager;
