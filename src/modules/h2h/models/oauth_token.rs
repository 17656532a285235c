use chrono::{DateTime, Duration, Utc};

/// Lifetime assigned to every issued token, independent of the issuer's TTL.
/// Kept below the bank's 60 minute token lifetime.
pub const TOKEN_TTL_SECONDS: i64 = 55 * 60;

/// OAuth2 bearer token with its local expiry
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl OAuthToken {
    /// Token issued at `now`, expiring [`TOKEN_TTL_SECONDS`] later
    pub fn issued_at(value: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at: now + Self::ttl(),
        }
    }

    pub fn ttl() -> Duration {
        Duration::seconds(TOKEN_TTL_SECONDS)
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self, now: DateTime<Utc>) -> std::time::Duration {
        (self.expires_at - now).to_std().unwrap_or_default()
    }
}

impl std::fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
