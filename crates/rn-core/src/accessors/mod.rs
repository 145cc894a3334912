//! # Entity Accessors
//!
//! One module per entity. Each turns a request intent into gateway calls and
//! maps rows, or their absence, into domain results and errors. Store
//! failures are propagated untranslated.

pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;

use crate::error::{AppError, Result};

/// Parses a path identifier. Anything but a base-10 `i32` is rejected before
/// the store is touched.
pub fn parse_id(raw: &str) -> Result<i32> {
    raw.parse()
        .map_err(|_| AppError::InvalidInput(format!("not a valid identifier: {raw}")))
}
