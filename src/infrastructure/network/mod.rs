pub mod client;
pub mod http;

pub use client::GitHubGists;
pub use http::create_client;
