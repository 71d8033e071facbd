//! Error types for cropdoc-dx
//!
//! Core pipeline errors (`InputError`, `DiagnosisError`) carry no HTTP
//! knowledge; `ApiError` maps them onto status codes at the boundary.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Upload rejected before decoding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please upload a valid image file (got content type '{0}')")]
    NotAnImage(String),

    #[error("Empty file uploaded")]
    Empty,

    #[error("File too large: {size} bytes (maximum {limit})")]
    TooLarge { size: usize, limit: usize },
}

/// Failure of the classify operation
///
/// Classification itself is total; only input validation and decoding fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiagnosisError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Could not decode image: {0}")]
    Decode(String),
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upload is well-formed but not a decodable image (422)
    #[error("{0}")]
    Undecodable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// cropdoc-common error
    #[error("Common error: {0}")]
    Common(#[from] cropdoc_common::Error),
}

impl From<DiagnosisError> for ApiError {
    fn from(err: DiagnosisError) -> Self {
        match err {
            DiagnosisError::Input(e) => ApiError::BadRequest(e.to_string()),
            e @ DiagnosisError::Decode(_) => ApiError::Undecodable(e.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(format!("Malformed multipart body: {}", err.body_text()))
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(err: MultipartRejection) -> Self {
        ApiError::BadRequest(format!("Malformed multipart body: {}", err.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Common(cropdoc_common::Error::Database(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Undecodable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DECODE_ERROR", msg)
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMMON_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
