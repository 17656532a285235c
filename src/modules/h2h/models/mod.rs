pub mod credential;
pub mod endpoint;
pub mod oauth_token;

pub use credential::{H2hCredential, DEFAULT_CLIENT_ID_PREFIX, DEFAULT_TIMEOUT_SECONDS};
pub use endpoint::H2hEndpoint;
pub use oauth_token::{OAuthToken, TOKEN_TTL_SECONDS};
