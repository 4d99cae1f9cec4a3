// In-memory result cache using DashMap
use crate::domain::error::CacheError;
use crate::domain::model::{CacheKey, Matches};
use crate::domain::traits::ResultCache;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Default time-to-live for cached search results.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
/// Longest time-to-live an entry can get; larger requests are clamped.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Matches,
    expires_at: Instant,
    cached_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe in-memory cache keyed by `(username, pattern, page)`.
///
/// Each entry is replaced as a whole under its shard lock, so readers never
/// see a partially written value.
pub struct MemoryCache {
    map: DashMap<CacheKey, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    pub fn lookup(&self, key: &CacheKey) -> Option<Matches> {
        let now = Instant::now();
        if let Some(entry) = self.map.get(key) {
            if !entry.is_expired(now) {
                tracing::debug!(
                    username = %key.username,
                    pattern = %key.pattern,
                    cached_at = %entry.cached_at,
                    "cache hit"
                );
                return Some(entry.value.clone());
            }
        } else {
            return None;
        }

        // Re-check under the write lock so a fresh put racing with us survives.
        if self
            .map
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            tracing::debug!(username = %key.username, pattern = %key.pattern, "evicted expired entry");
        }
        None
    }

    pub fn store(&self, key: CacheKey, mut value: Matches, ttl: Duration) {
        value.cache = false;
        let expires_at = Instant::now() + ttl.min(MAX_TTL);
        let entry = CacheEntry {
            value,
            expires_at,
            cached_at: Utc::now(),
        };
        self.map.insert(key, entry);
    }

    /// Drop every expired entry. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.map.len();
        self.map.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.map.len())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Matches>, CacheError> {
        Ok(self.lookup(key))
    }

    async fn put(&self, key: CacheKey, value: Matches, ttl: Duration) -> Result<(), CacheError> {
        self.store(key, value, ttl);
        Ok(())
    }
}
