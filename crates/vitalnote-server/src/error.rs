use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use vitalnote_core::{ExtractionError, NoteError};

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Body could not be decoded as a parse request.
    BadRequest,
    /// Body exceeded the configured size limit.
    PayloadTooLarge,
    /// Note failed its length preconditions.
    InvalidNote(NoteError),
    /// Extraction rejected the note's contents.
    Extraction(ExtractionError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "bad request".to_string()),
            ApiError::PayloadTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "request body too large".to_string())
            }
            ApiError::InvalidNote(_) => (StatusCode::BAD_REQUEST, "invalid request".to_string()),
            ApiError::Extraction(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            tracing::debug!("rejected request body: {rejection}");
            ApiError::BadRequest
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(e: NoteError) -> Self {
        ApiError::InvalidNote(e)
    }
}

impl From<ExtractionError> for ApiError {
    fn from(e: ExtractionError) -> Self {
        ApiError::Extraction(e)
    }
}
