//! HTTP surface: `/ping` and `/api/v1/search`.

pub mod handlers;
pub mod routes;

pub use routes::create_router;
