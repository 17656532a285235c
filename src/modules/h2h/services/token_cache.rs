//! Shared OAuth token cache
//!
//! The token manager consults this cache when its in-memory token is missing
//! or expired, so several clients in one process can share a token.
//! Implementations are key-value stores with per-entry TTL.

use crate::core::{Clock, SystemClock};
use crate::modules::h2h::models::OAuthToken;
use moka::sync::Cache;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Well-known cache key of the H2H OAuth token
pub const OAUTH_TOKEN_CACHE_KEY: &str = "bni.payment.oauth_token";

/// Default max capacity of [`MokaTokenCache`]
pub const DEFAULT_TOKEN_CACHE_CAPACITY: u64 = 64;

/// Key-value cache with TTL for OAuth tokens
pub trait TokenCache: Send + Sync {
    /// Cached token, if present and not expired
    fn get(&self, key: &str) -> Option<OAuthToken>;

    /// Store a token for at most `ttl`
    fn put(&self, key: &str, token: OAuthToken, ttl: Duration);

    /// Remove the entry
    fn forget(&self, key: &str);
}

#[derive(Clone)]
struct CacheEntry {
    token: OAuthToken,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, CacheEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process [`TokenCache`] backed by moka
///
/// Entries expire through moka's per-entry TTL and are additionally checked
/// against the injected clock's view of `expires_at` on read.
pub struct MokaTokenCache {
    entries: Cache<String, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl MokaTokenCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let entries = Cache::builder()
            .max_capacity(DEFAULT_TOKEN_CACHE_CAPACITY)
            .expire_after(PerEntryTtl)
            .build();

        Self { entries, clock }
    }
}

impl Default for MokaTokenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCache for MokaTokenCache {
    fn get(&self, key: &str) -> Option<OAuthToken> {
        let entry = self.entries.get(key)?;

        if entry.token.is_valid_at(self.clock.now()) {
            tracing::debug!(cache_key = %key, "OAuth token cache hit");
            Some(entry.token)
        } else {
            tracing::debug!(cache_key = %key, "OAuth token cache entry expired");
            self.entries.invalidate(key);
            None
        }
    }

    fn put(&self, key: &str, token: OAuthToken, ttl: Duration) {
        self.entries.insert(key.to_string(), CacheEntry { token, ttl });
    }

    fn forget(&self, key: &str) {
        self.entries.invalidate(key);
    }
}
