//! Glue between the core error translator and axum responses.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rn_core::error::AppError;
use rn_core::translate::translate;

/// Every handler failure ends up here and yields exactly one response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Path segments that do not decode are treated like non-numeric ids.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AppError::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::InvalidInput(rejection.body_text()))
    }
}

/// A field of the wrong type is invalid input. A body that is absent, not
/// JSON at all, or too large to buffer is malformed.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let err = match rejection {
            JsonRejection::JsonDataError(e) => AppError::InvalidInput(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => AppError::MalformedBody(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => AppError::MalformedBody(e.body_text()),
            JsonRejection::BytesRejection(e) => AppError::MalformedBody(e.body_text()),
            other => AppError::Internal(other.body_text()),
        };
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.0, "request failed");
        let reply = translate(self.0);
        let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), msg = %reply.msg, "client error");
        }
        (status, Json(reply)).into_response()
    }
}
