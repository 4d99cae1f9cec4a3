pub mod cache;

pub use cache::{MemoryCache, DEFAULT_TTL, MAX_TTL};
