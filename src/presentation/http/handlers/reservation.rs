//! Reservation Handlers
//!
//! HTTP handlers for taking, returning and listing rented books.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::{bad_json, bad_path};
use crate::application::dto::request::{ReturnBookRequest, TakeBookRequest};
use crate::application::dto::response::{ReservationResponse, TakeBookResponse};
use crate::application::services::{ReservationError, ReturnBookDto, TakeBookDto};
use crate::presentation::http::extractors::UserName;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Helper to convert ReservationError to AppError
pub(crate) fn map_reservation_error(e: ReservationError) -> AppError {
    match e {
        ReservationError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
        err @ ReservationError::LimitExceeded { .. } => AppError::Forbidden(err.to_string()),
        ReservationError::Invalid(msg) => AppError::BadRequest(msg),
        ReservationError::Upstream(e) => AppError::Upstream(e),
        ReservationError::Internal(msg) => AppError::Internal(msg),
    }
}

/// List the caller's rented books
///
/// GET /api/v1/reservations
pub async fn get_reservations(
    State(state): State<AppState>,
    user: UserName,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let reservations = state
        .reservation_service
        .get_reservations(user.as_str())
        .await
        .map_err(map_reservation_error)?;

    Ok(Json(
        reservations.into_iter().map(ReservationResponse::from).collect(),
    ))
}

/// Take a book
///
/// POST /api/v1/reservations
///
/// Opens a reservation for the copy, checks it out of the library and
/// returns the reservation with the caller's current rating. The caller
/// may hold at most as many books as their rating has stars.
pub async fn take_book(
    State(state): State<AppState>,
    user: UserName,
    body: Result<Json<TakeBookRequest>, JsonRejection>,
) -> Result<Json<TakeBookResponse>, AppError> {
    let Json(body) = body.map_err(bad_json)?;

    let dto = TakeBookDto {
        book_uid: body.book_uid,
        library_uid: body.library_uid,
        till_date: body.till_date,
    };

    let result = state
        .reservation_service
        .take_book(user.as_str(), dto)
        .await
        .map_err(map_reservation_error)?;

    Ok(Json(result.into()))
}

/// Return a book
///
/// POST /api/v1/reservations/{reservationUid}/return
pub async fn return_book(
    State(state): State<AppState>,
    user: UserName,
    reservation_uid: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ReturnBookRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(reservation_uid) = reservation_uid.map_err(bad_path)?;
    let Json(body) = body.map_err(bad_json)?;

    let dto = ReturnBookDto {
        condition: body.condition,
        date: body.date,
    };

    state
        .reservation_service
        .return_book(user.as_str(), reservation_uid, dto)
        .await
        .map_err(map_reservation_error)?;

    Ok(StatusCode::NO_CONTENT)
}
