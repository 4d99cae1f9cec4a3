use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// 搜索请求 (入站 JSON)
//
// Fields are optional so that an absent key and an empty string reach
// validation through the same path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

impl SearchRequest {
    pub fn new(username: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            pattern: Some(pattern.into()),
            page: None,
        }
    }

    /// Returns `(username, pattern)` when both are present and non-empty.
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|s| !s.is_empty())?;
        let pattern = self.pattern.as_deref().filter(|s| !s.is_empty())?;
        Some((username, pattern))
    }

    /// Listing page, 1-based. Zero is treated as the first page.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

// 上游 gist 元数据
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GistSummary {
    pub id: String,
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GistFile {
    pub raw_url: String,
}

/// Successful search payload. This is the only shape the cache stores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Matches {
    pub username: String,
    pub pattern: String,
    pub matches: Vec<String>,
    /// Set only on responses served from the cache.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cache: bool,
}

impl Matches {
    pub fn new(username: String, pattern: String, matches: Vec<String>) -> Self {
        Self {
            username,
            pattern,
            matches,
            cache: false,
        }
    }
}

/// Response body of `/api/v1/search`.
///
/// Serializes as `{"status": "success", ...Matches}` or
/// `{"status": "failure", "errormessage": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SearchResult {
    Success(Matches),
    Failure { errormessage: String },
}

impl SearchResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            errormessage: message.into(),
        }
    }

    pub fn matches(&self) -> Option<&Matches> {
        match self {
            Self::Success(m) => Some(m),
            Self::Failure { .. } => None,
        }
    }
}

// 缓存键: 不做大小写或空白归一化
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub username: String,
    pub pattern: String,
    pub page: u32,
}

impl CacheKey {
    pub fn new(username: impl Into<String>, pattern: impl Into<String>, page: u32) -> Self {
        Self {
            username: username.into(),
            pattern: pattern.into(),
            page,
        }
    }
}
