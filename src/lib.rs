//! Regular-expression search over a user's public gists, served over HTTP
//! with a TTL result cache in front of the upstream fan-out.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod state;

pub use application::{GistSearcher, SearchSettings};
pub use domain::model::{SearchRequest, SearchResult};
pub use state::AppState;
