//! Request- and service-level errors.
//!
//! `ApiError` is the HTTP-facing error: it knows which envelope and status
//! code each failure maps to. Client mistakes answer 400, missing or bad
//! credentials answer 401, and every backend fault collapses to an opaque
//! 500 so internals never leak into a response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::domain::response::{ErrorResponse, ValidationResponse};
use crate::pipeline::PipelineError;
use crate::sanitize::FieldError;

/// Error surfaced by a request handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or invalid credentials.
    #[error("Unauthorized. Please login")]
    Unauthorized,

    /// Field-level form validation failures.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Any other client mistake; the message is safe to echo.
    #[error("{0}")]
    BadRequest(String),

    /// Backend fault. The detail goes to the log, not the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::RecordNotFound => {
                ApiError::BadRequest("User profile not found!".to_string())
            }
            PipelineError::MissingFile => ApiError::BadRequest("No file uploaded".to_string()),
            PipelineError::RejectedFormat(f) => ApiError::BadRequest(f.to_string()),
            PipelineError::AlreadyExists => ApiError::BadRequest(e.to_string()),
            PipelineError::Contended
            | PipelineError::Storage(_)
            | PipelineError::Records(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Unauthorized. Please login")),
            )
                .into_response(),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationResponse::new(errors)),
            )
                .into_response(),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
            }
            ApiError::Internal(detail) => {
                error!(error = %detail, "request failed on a backend fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal Server Error")),
                )
                    .into_response()
            }
        }
    }
}

/// Service lifecycle errors (startup and shutdown, not per-request).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<crate::domain::config::ConfigError> for ServiceError {
    fn from(e: crate::domain::config::ConfigError) -> Self {
        ServiceError::Config(e.to_string())
    }
}
