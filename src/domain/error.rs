use reqwest::StatusCode;
use thiserror::Error;

/// Message returned when either search field is absent or empty.
pub const MISSING_INPUT_MESSAGE: &str = "missing username or pattern to match";
/// Message returned when the pattern does not compile.
pub const INVALID_PATTERN_MESSAGE: &str = "invalid pattern to match";

/// Failure talking to the paste service.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream returned HTTP {status}")]
    Status { status: StatusCode },

    /// The service answered with its own error object, e.g. `{"message": "Not Found"}`.
    #[error("Upstream error (HTTP {status}): {message}")]
    Reported { status: StatusCode, message: String },

    #[error("Malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Text that may be shown to API callers.
    ///
    /// Only messages written by the upstream service are passed through;
    /// everything else is replaced with a fixed description.
    pub fn user_message(&self) -> String {
        match self {
            Self::Reported { message, .. } => message.clone(),
            Self::Status { status } => status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            Self::Timeout => "upstream request timed out".to_string(),
            Self::Network(_) => "upstream service unavailable".to_string(),
            Self::Decode(_) => "malformed upstream response".to_string(),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Status { status }
        } else {
            Self::Network(err)
        }
    }
}

/// Failure of the result cache backend. Never fails a search.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Reasons a search ends with `status = failure`.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("missing username or pattern to match")]
    MissingInput,

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl SearchError {
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput => MISSING_INPUT_MESSAGE.to_string(),
            Self::InvalidPattern(_) => INVALID_PATTERN_MESSAGE.to_string(),
            Self::Upstream(e) => e.user_message(),
        }
    }
}

/// Start-up and configuration errors.
#[derive(Error, Debug)]
pub enum GistError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
