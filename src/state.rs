use crate::application::{GistSearcher, SearchSettings};
use crate::domain::error::GistError;
use crate::domain::traits::{GistSource, ResultCache};
use crate::infrastructure::config::Config;
use crate::infrastructure::network::{create_client, GitHubGists};
use crate::infrastructure::storage::MemoryCache;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub searcher: Arc<GistSearcher>,
    pub cache: Arc<MemoryCache>,
}

impl AppState {
    /// Wire the GitHub-backed searcher with a fresh, empty cache.
    pub fn new(config: Config) -> Result<Self, GistError> {
        let http_client = create_client(&config.upstream)?;
        let source = GitHubGists::new(
            http_client,
            &config.upstream.api_base,
            config.upstream.per_page,
        )?;
        Ok(Self::with_source(config, Arc::new(source)))
    }

    pub fn with_source(config: Config, source: Arc<dyn GistSource>) -> Self {
        let cache = Arc::new(MemoryCache::new());
        let searcher = GistSearcher::new(
            source,
            cache.clone() as Arc<dyn ResultCache>,
            SearchSettings::from_config(&config),
        );

        Self {
            searcher: Arc::new(searcher),
            cache,
        }
    }
}
