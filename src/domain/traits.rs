use crate::domain::error::{CacheError, UpstreamError};
use crate::domain::model::{CacheKey, GistSummary, Matches};
use async_trait::async_trait;
use std::time::Duration;

/// Access to the paste service.
///
/// The production implementation talks to the GitHub REST API; tests swap
/// in canned sources without changing the orchestrator.
#[async_trait]
pub trait GistSource: Send + Sync {
    /// List one page of a user's public gists.
    async fn list_gists(&self, username: &str, page: u32) -> Result<Vec<GistSummary>, UpstreamError>;

    /// Fetch the raw text of one gist file.
    async fn fetch_raw(&self, url: &str) -> Result<String, UpstreamError>;
}

/// Storage for successful search results.
///
/// Backends may be remote, so both operations can fail; callers treat a
/// failed read as a miss and ignore failed writes.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Get a live entry. Expired entries behave as absent.
    async fn get(&self, key: &CacheKey) -> Result<Option<Matches>, CacheError>;

    /// Store or replace the entry for `key`, expiring after `ttl`.
    async fn put(&self, key: CacheKey, value: Matches, ttl: Duration) -> Result<(), CacheError>;
}
