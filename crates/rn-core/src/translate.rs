//! # Error Translator
//!
//! Turns an [`AppError`] into an HTTP status and client-facing message in
//! three ordered stages. A stage returns `Ok` when it handles the error and
//! hands it back untouched in `Err` otherwise; the fallback always answers.

use serde::Serialize;

use crate::error::{codes, AppError, StoreError};

pub const MSG_INVALID_INPUT: &str = "Bad Request: Invalid input";
pub const MSG_MALFORMED_BODY: &str = "Malformed body / Missing required fields";
pub const MSG_REFERENCE_VIOLATION: &str =
    "Either the article or the author to be input still doesn't exist in the database";
pub const MSG_INTERNAL: &str = "Internal Server Error!";

/// Status and message sent back to the client as `{"msg": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReply {
    #[serde(skip)]
    pub status: u16,
    pub msg: String,
}

impl ErrorReply {
    pub fn new(status: u16, msg: impl Into<String>) -> Self {
        Self {
            status,
            msg: msg.into(),
        }
    }
}

/// Runs the whole chain.
pub fn translate(err: AppError) -> ErrorReply {
    domain_stage(err)
        .or_else(store_stage)
        .unwrap_or_else(fallback_stage)
}

/// Errors raised by accessors and handlers carry their own status.
pub fn domain_stage(err: AppError) -> Result<ErrorReply, AppError> {
    match err {
        AppError::NotFound(msg) => Ok(ErrorReply::new(404, msg)),
        AppError::InvalidInput(_) => Ok(ErrorReply::new(400, MSG_INVALID_INPUT)),
        AppError::MalformedBody(_) => Ok(ErrorReply::new(400, MSG_MALFORMED_BODY)),
        AppError::InvalidSortField(field) => {
            Ok(ErrorReply::new(400, format!("Invalid sort_by query: {field}")))
        }
        AppError::InvalidSortOrder(order) => {
            Ok(ErrorReply::new(400, format!("Invalid order query: {order}")))
        }
        other => Err(other),
    }
}

/// Recognised driver codes. Unknown codes and code-less store errors pass on.
pub fn store_stage(err: AppError) -> Result<ErrorReply, AppError> {
    let reply = match &err {
        AppError::Store(StoreError { code: Some(code), .. }) => match code.as_str() {
            codes::INVALID_TEXT_REPRESENTATION | codes::NUMERIC_VALUE_OUT_OF_RANGE => {
                Some(ErrorReply::new(400, MSG_INVALID_INPUT))
            }
            codes::NOT_NULL_VIOLATION => Some(ErrorReply::new(400, MSG_MALFORMED_BODY)),
            codes::FOREIGN_KEY_VIOLATION => Some(ErrorReply::new(400, MSG_REFERENCE_VIOLATION)),
            _ => None,
        },
        _ => None,
    };
    reply.ok_or(err)
}

/// Anything left over. The cause never reaches the message.
pub fn fallback_stage(err: AppError) -> ErrorReply {
    tracing::error!(error = %err, "unhandled error");
    ErrorReply::new(500, MSG_INTERNAL)
}
