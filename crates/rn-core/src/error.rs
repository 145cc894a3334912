//! # AppError
//!
//! Centralized error handling for rusty-news.
//! Accessors return these; the translator turns them into status + message.

use thiserror::Error;

/// SQLSTATE codes the translator recognises.
pub mod codes {
    /// `invalid_text_representation`: a literal the store could not parse
    pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";
    /// `numeric_value_out_of_range`: e.g. a vote total past the column type
    pub const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
    pub const NOT_NULL_VIOLATION: &str = "23502";
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
}

/// A failure reported by the record store, untranslated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("store error (code {code:?}): {message}")]
pub struct StoreError {
    /// Driver error code (SQLSTATE for Postgres), when the driver reported one
    pub code: Option<String>,
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// The primary error type for all rn-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Entity absent; the message is sent to the client verbatim
    #[error("{0}")]
    NotFound(String),

    /// Malformed identifier or wrongly typed value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Missing or empty required field
    #[error("malformed body: {0}")]
    MalformedBody(String),

    #[error("invalid sort_by: {0}")]
    InvalidSortField(String),

    #[error("invalid order: {0}")]
    InvalidSortOrder(String),

    /// Store failure, left for the translator's storage stage. Dangling
    /// references on insert arrive here as a foreign-key violation code.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for rusty-news logic.
pub type Result<T> = std::result::Result<T, AppError>;
