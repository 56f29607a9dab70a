//! HTTP error types for the Cash Card server.
//!
//! Every variant except [`AppError::NotFound`] produces a JSON body with a
//! machine-readable `error` field and a human-readable `message`.
//! `NotFound` deliberately carries no message and renders an empty body:
//! "this id does not exist" and "this id belongs to someone else" must be
//! byte-identical on the wire, and a message string is one more place for
//! the two to drift apart.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use cashcard_core::SortParseError;
use cashcard_storage::StoreError;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed — missing, malformed, or wrong credentials.
    Unauthorized(String),
    /// The principal's role denies the card resource class.
    Forbidden(String),
    /// The card is absent, or hidden from this principal. Empty body.
    NotFound,
    /// Client sent invalid input.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::NotFound => return StatusCode::NOT_FOUND.into_response(),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<SortParseError> for AppError {
    fn from(err: SortParseError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
