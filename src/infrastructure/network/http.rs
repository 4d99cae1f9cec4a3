// HTTP client utilities
use crate::domain::error::GistError;
use crate::infrastructure::config::UpstreamConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;

/// Create the shared outbound HTTP client.
///
/// Every request inherits the configured timeout, so no upstream call can
/// block a search indefinitely.
pub fn create_client(upstream: &UpstreamConfig) -> Result<Client, GistError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );

    Ok(Client::builder()
        .default_headers(headers)
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(upstream.timeout_secs))
        .user_agent(upstream.user_agent.as_str())
        .build()?)
}
