use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::domain::model::{SearchRequest, SearchResult};
use crate::state::AppState;

pub async fn ping() -> &'static str {
    "pong"
}

/// Search a user's gists. Always answers 200; failures are reported in the
/// body's `status` field.
pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Json<SearchResult> {
    // An unreadable body carries neither field, so it fails validation.
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable search body");
            SearchRequest::default()
        }
    };

    Json(state.searcher.search(&request).await)
}
