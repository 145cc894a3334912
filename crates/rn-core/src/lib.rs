//! rusty-news/crates/rn-core/src/lib.rs
//!
//! Domain models, the record store port, and the logic between them:
//! entity accessors, the article listing query builder and the error
//! translator.

pub mod accessors;
pub mod error;
pub mod listing;
pub mod models;
pub mod traits;
pub mod translate;

// Re-exporting for easier access in other crates
pub use error::*;
pub use listing::{ArticleListing, SortField, SortOrder};
pub use models::*;
pub use traits::*;
