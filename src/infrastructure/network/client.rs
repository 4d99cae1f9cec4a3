use crate::domain::error::{GistError, UpstreamError};
use crate::domain::model::GistSummary;
use crate::domain::traits::GistSource;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

// The listing endpoint answers with either an array of gists or a single
// error object such as {"message": "Not Found", "documentation_url": ...}.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ListingResponse {
    Gists(Vec<GistSummary>),
    Error { message: String },
}

/// GitHub gist API implementation of [`GistSource`].
pub struct GitHubGists {
    client: Client,
    api_base: Url,
    per_page: u32,
}

impl GitHubGists {
    pub fn new(client: Client, api_base: &str, per_page: u32) -> Result<Self, GistError> {
        let api_base = Url::parse(api_base)
            .map_err(|e| GistError::Config(format!("Invalid upstream api_base '{}': {}", api_base, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(GistError::Config(format!(
                "Upstream api_base '{}' cannot be a base URL",
                api_base
            )));
        }
        Ok(Self {
            client,
            api_base,
            per_page,
        })
    }

    /// `{api_base}/users/{username}/gists`, with the username escaped as a
    /// single path segment.
    fn listing_url(&self, username: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", username, "gists"]);
        }
        url
    }
}

#[async_trait]
impl GistSource for GitHubGists {
    async fn list_gists(&self, username: &str, page: u32) -> Result<Vec<GistSummary>, UpstreamError> {
        let page = page.to_string();
        let per_page = self.per_page.to_string();
        let params = [("page", page.as_str()), ("per_page", per_page.as_str())];

        let response = self
            .client
            .get(self.listing_url(username))
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<ListingResponse>(&body) {
            Ok(ListingResponse::Gists(gists)) if status.is_success() => Ok(gists),
            Ok(ListingResponse::Error { message }) => {
                tracing::warn!(%username, %status, %message, "gist listing rejected");
                Err(UpstreamError::Reported { status, message })
            }
            Ok(ListingResponse::Gists(_)) => Err(UpstreamError::Status { status }),
            Err(_) if !status.is_success() => Err(UpstreamError::Status { status }),
            Err(e) => Err(UpstreamError::Decode(e)),
        }
    }

    async fn fetch_raw(&self, url: &str) -> Result<String, UpstreamError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { status });
        }
        Ok(response.text().await?)
    }
}
