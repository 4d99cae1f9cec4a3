pub mod error;
pub mod model;
pub mod pattern;
pub mod traits;
