pub mod search;

pub use search::{GistSearcher, SearchSettings};
