//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod health;
pub mod library;
pub mod rating;
pub mod reservation;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

use crate::shared::error::AppError;

/// Turn an extractor rejection into the common error body.
pub(crate) fn bad_json(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

pub(crate) fn bad_path(rejection: PathRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

pub(crate) fn bad_query(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}
