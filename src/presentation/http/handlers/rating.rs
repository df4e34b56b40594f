//! Rating Handlers

use axum::{extract::State, Json};

use crate::application::dto::response::RatingResponse;
use crate::application::services::RatingError;
use crate::presentation::http::extractors::UserName;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn map_rating_error(e: RatingError) -> AppError {
    match e {
        RatingError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
        RatingError::Upstream(e) => AppError::Upstream(e),
    }
}

/// Get the caller's rating
///
/// GET /api/v1/rating
pub async fn get_rating(
    State(state): State<AppState>,
    user: UserName,
) -> Result<Json<RatingResponse>, AppError> {
    let rating = state
        .rating_service
        .get_rating(user.as_str())
        .await
        .map_err(map_rating_error)?;

    Ok(Json(rating.into()))
}
