use crate::domain::error::SearchError;
use crate::domain::model::{CacheKey, GistSummary, Matches, SearchRequest, SearchResult};
use crate::domain::pattern::Pattern;
use crate::domain::traits::{GistSource, ResultCache};
use crate::infrastructure::config::Config;
use futures_util::{stream, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub ttl: Duration,
    /// Maximum number of file fetches in flight for one search.
    pub concurrency: usize,
    /// Prefix for match URLs, e.g. `https://gist.github.com`.
    pub gist_base: String,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ttl: config.cache_ttl(),
            concurrency: config.upstream.concurrency.max(1),
            gist_base: config.upstream.gist_base.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Drives a search: validate, consult the cache, fan out, write back.
pub struct GistSearcher {
    source: Arc<dyn GistSource>,
    cache: Arc<dyn ResultCache>,
    settings: SearchSettings,
}

impl GistSearcher {
    pub fn new(
        source: Arc<dyn GistSource>,
        cache: Arc<dyn ResultCache>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            source,
            cache,
            settings,
        }
    }

    /// Run a search. Every failure is folded into `SearchResult::Failure`.
    pub async fn search(&self, request: &SearchRequest) -> SearchResult {
        let span = tracing::info_span!(
            "search",
            request_id = %Uuid::new_v4(),
            username = request.username.as_deref().unwrap_or_default(),
            pattern = request.pattern.as_deref().unwrap_or_default(),
        );

        async {
            match self.run(request).await {
                Ok(matches) => SearchResult::Success(matches),
                Err(e) => {
                    tracing::info!(error = %e, "search failed");
                    SearchResult::failure(e.user_message())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: &SearchRequest) -> Result<Matches, SearchError> {
        // 1. Validate before any I/O
        let (username, pattern_src) = request.required_fields().ok_or(SearchError::MissingInput)?;
        let pattern = Pattern::compile(pattern_src)?;
        let key = CacheKey::new(username, pattern_src, request.page());

        // 2. Cache
        match self.cache.get(&key).await {
            Ok(Some(mut cached)) => {
                cached.cache = true;
                return Ok(cached);
            }
            Ok(None) => tracing::debug!("cache miss"),
            Err(e) => tracing::warn!(error = %e, "cache read failed, treating as miss"),
        }

        // 3. Online fan-out
        let gists = self.source.list_gists(username, key.page).await?;
        tracing::debug!(gists = gists.len(), "listed gists");
        let urls = self.scan(username, &pattern, &gists).await;
        let result = Matches::new(username.to_string(), pattern_src.to_string(), urls);

        // 4. Write back to cache
        if let Err(e) = self.cache.put(key, result.clone(), self.settings.ttl).await {
            tracing::warn!(error = %e, "cache write failed");
        }

        Ok(result)
    }

    /// Fetch the files of every gist and return the URLs of gists with at
    /// least one matching file, in listing order, each at most once. Files of
    /// a gist that already matched are skipped.
    async fn scan(&self, username: &str, pattern: &Pattern, gists: &[GistSummary]) -> Vec<String> {
        let jobs: Vec<(usize, String, String)> = gists
            .iter()
            .enumerate()
            .flat_map(|(idx, gist)| {
                gist.files
                    .iter()
                    .map(move |(name, file)| (idx, name.clone(), file.raw_url.clone()))
            })
            .collect();

        // Indexed by listing position, so completion order does not matter.
        let matched: Vec<AtomicBool> = gists.iter().map(|_| AtomicBool::new(false)).collect();
        let flags = &matched;

        stream::iter(jobs)
            .for_each_concurrent(self.settings.concurrency, |(idx, name, url)| async move {
                if flags[idx].load(Ordering::Acquire) {
                    tracing::trace!(gist = %gists[idx].id, file = %name, "gist already matched");
                    return;
                }
                match self.source.fetch_raw(&url).await {
                    Ok(text) => {
                        if pattern.is_match(&text) {
                            flags[idx].store(true, Ordering::Release);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(gist = %gists[idx].id, file = %name, error = %e, "fetch failed, skipping file");
                    }
                }
            })
            .await;

        gists
            .iter()
            .zip(matched)
            .filter(|(_, hit)| hit.load(Ordering::Acquire))
            .map(|(gist, _)| self.gist_url(username, &gist.id))
            .collect()
    }

    fn gist_url(&self, username: &str, id: &str) -> String {
        format!("{}/{}/{}", self.settings.gist_base, username, id)
    }
}
