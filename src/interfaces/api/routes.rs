use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::interfaces::api::handlers;
use crate::state::AppState;

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new().route("/search", post(handlers::search))
}
