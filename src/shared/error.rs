//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of a call to one of the collaborator services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// The collaborator answered 404 for the referenced entity.
    #[error("{service}: {what} not found")]
    NotFound { service: &'static str, what: String },

    /// The collaborator rejected a conditional write with 409.
    #[error("{service}: conflict: {message}")]
    Conflict {
        service: &'static str,
        message: String,
    },

    /// Connection refused, timed out or otherwise unreachable.
    #[error("{service}: unavailable: {message}")]
    Unavailable {
        service: &'static str,
        message: String,
    },

    /// Any other non-success status.
    #[error("{service}: responded with status {status}")]
    Status { service: &'static str, status: u16 },

    /// The response body could not be decoded.
    #[error("{service}: malformed response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

impl UpstreamError {
    /// Name of the collaborator that produced the error.
    pub fn service(&self) -> &'static str {
        match self {
            Self::NotFound { service, .. }
            | Self::Conflict { service, .. }
            | Self::Unavailable { service, .. }
            | Self::Status { service, .. }
            | Self::Decode { service, .. } => service,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, 10001, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 10002, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, 10004, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, 10007, msg.clone()),
            AppError::Upstream(e) => {
                tracing::error!(service = e.service(), "Upstream error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
        };

        let body = ErrorResponse { code, message };

        (status, Json(body)).into_response()
    }
}
