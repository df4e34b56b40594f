//! Reservation Service
//!
//! Orchestrates the catalog, reservation and rating services to take out
//! and return books.
//!
//! None of the collaborators share a transaction. Taking a book creates the
//! reservation before the copy is checked out; when the check-out fails the
//! reservation is closed again as a compensation step. Returning a book
//! closes the reservation, checks the copy in and then rewrites the rating,
//! and a failure half-way leaves the earlier steps in place.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::application::services::rating_service::{
    RatingDto, RatingError, RatingService, RatingServiceImpl,
};
use crate::domain::services::RatingPolicy;
use crate::domain::{
    Book, BookCondition, BookInfo, CatalogClient, Library, NewReservation, RatingClient,
    Reservation, ReservationClient, ReservationStatus,
};
use crate::infrastructure::metrics;
use crate::shared::error::UpstreamError;

/// Reservation service trait defining the rental use cases.
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Take a book out of a library.
    async fn take_book(
        &self,
        user_name: &str,
        request: TakeBookDto,
    ) -> Result<TakeBookResultDto, ReservationError>;

    /// Return a previously taken book and settle the rating.
    async fn return_book(
        &self,
        user_name: &str,
        reservation_uid: Uuid,
        request: ReturnBookDto,
    ) -> Result<(), ReservationError>;

    /// List every reservation of a user with its book and library.
    async fn get_reservations(&self, user_name: &str) -> Result<Vec<ReservationDto>, ReservationError>;
}

/// Request DTO for taking a book.
#[derive(Debug, Clone)]
pub struct TakeBookDto {
    pub book_uid: Uuid,
    pub library_uid: Uuid,
    /// Date the book is due back.
    pub till_date: NaiveDate,
}

/// Request DTO for returning a book.
#[derive(Debug, Clone)]
pub struct ReturnBookDto {
    /// Condition the copy is returned in.
    pub condition: BookCondition,
    /// Date of the return.
    pub date: NaiveDate,
}

/// Reservation joined with its book and library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDto {
    pub reservation_uid: Uuid,
    pub status: ReservationStatus,
    pub start_date: NaiveDate,
    pub till_date: NaiveDate,
    pub book: Book,
    pub library: Library,
}

impl ReservationDto {
    /// Join a reservation with the catalog record of its copy.
    pub fn new(reservation: Reservation, book: Book, library: Library) -> Self {
        Self {
            reservation_uid: reservation.reservation_uid,
            status: reservation.status,
            start_date: reservation.start_date,
            till_date: reservation.till_date,
            book,
            library,
        }
    }
}

/// Result of taking a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeBookResultDto {
    pub reservation: ReservationDto,
    /// Rating at the time the book was taken.
    pub rating: RatingDto,
}

/// Reservation service errors.
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Rental limit reached: a rating of {limit} does not allow another book")]
    LimitExceeded { limit: i32 },

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error(transparent)]
    Upstream(UpstreamError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UpstreamError> for ReservationError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound { what, .. } => ReservationError::NotFound(what),
            other => ReservationError::Upstream(other),
        }
    }
}

impl From<RatingError> for ReservationError {
    fn from(err: RatingError) -> Self {
        match err {
            RatingError::NotFound(what) => ReservationError::NotFound(what),
            RatingError::Upstream(e) => ReservationError::Upstream(e),
        }
    }
}

impl ReservationError {
    /// Metric label for a failed operation.
    fn outcome(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::LimitExceeded { .. } => "limit_exceeded",
            Self::Invalid(_) => "invalid",
            Self::Upstream(_) => "upstream_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Reservation service implementation.
pub struct ReservationServiceImpl<C, V, R>
where
    C: CatalogClient,
    V: ReservationClient,
    R: RatingClient,
{
    catalog: Arc<C>,
    reservations: Arc<V>,
    ratings: Arc<R>,
    rating_lookup: RatingServiceImpl<R>,
}

impl<C, V, R> ReservationServiceImpl<C, V, R>
where
    C: CatalogClient,
    V: ReservationClient,
    R: RatingClient,
{
    /// Create a new ReservationServiceImpl.
    pub fn new(catalog: Arc<C>, reservations: Arc<V>, ratings: Arc<R>) -> Self {
        let rating_lookup = RatingServiceImpl::new(ratings.clone());
        Self {
            catalog,
            reservations,
            ratings,
            rating_lookup,
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Close a reservation whose copy could not be checked out.
    async fn release_reservation(&self, user_name: &str, reservation: &Reservation) {
        match self
            .reservations
            .update_reservation(reservation.reservation_uid, user_name, Self::today())
            .await
        {
            Ok(_) => tracing::warn!(
                reservation_uid = %reservation.reservation_uid,
                user_name,
                "Check-out failed; reservation closed"
            ),
            Err(e) => tracing::error!(
                reservation_uid = %reservation.reservation_uid,
                user_name,
                error = %e,
                "Check-out failed and the reservation could not be closed; it is left rented"
            ),
        }
    }
}

impl<C, V, R> ReservationServiceImpl<C, V, R>
where
    C: CatalogClient + 'static,
    V: ReservationClient + 'static,
    R: RatingClient + 'static,
{
    async fn take_book_steps(
        &self,
        user_name: &str,
        request: TakeBookDto,
    ) -> Result<TakeBookResultDto, ReservationError> {
        let today = Self::today();
        if request.till_date < today {
            return Err(ReservationError::Invalid(format!(
                "tillDate {} is before today ({})",
                request.till_date, today
            )));
        }

        let BookInfo { book, library } = self
            .catalog
            .get_book(request.library_uid, request.book_uid)
            .await?;

        let rented = self
            .reservations
            .get_reservations(user_name, Some(ReservationStatus::Rented))
            .await?;

        let rating = self.rating_lookup.get_rating(user_name).await?;

        if !RatingPolicy::can_take(rented.len(), rating.stars) {
            tracing::info!(
                user_name,
                rented = rented.len(),
                stars = rating.stars,
                "Rental limit reached"
            );
            return Err(ReservationError::LimitExceeded {
                limit: rating.stars,
            });
        }

        let new_reservation = NewReservation {
            reservation_uid: Uuid::new_v4(),
            user_name: user_name.to_string(),
            book_uid: request.book_uid,
            library_uid: request.library_uid,
            start_date: today,
            till_date: request.till_date,
            rented_limit: rating.stars,
        };

        let reservation = match self.reservations.create_reservation(&new_reservation).await {
            Ok(reservation) => reservation,
            Err(UpstreamError::Conflict { message, .. }) => {
                // The store re-checked the limit and another rental got there first.
                tracing::info!(user_name, %message, "Reservation store rejected the rental");
                return Err(ReservationError::LimitExceeded {
                    limit: rating.stars,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = self
            .catalog
            .check_out(request.library_uid, request.book_uid)
            .await
        {
            self.release_reservation(user_name, &reservation).await;
            return Err(e.into());
        }

        tracing::info!(
            user_name,
            reservation_uid = %reservation.reservation_uid,
            book_uid = %request.book_uid,
            library_uid = %request.library_uid,
            till_date = %request.till_date,
            "Book taken"
        );

        Ok(TakeBookResultDto {
            reservation: ReservationDto::new(reservation, book, library),
            rating,
        })
    }

    async fn return_book_steps(
        &self,
        user_name: &str,
        reservation_uid: Uuid,
        request: ReturnBookDto,
    ) -> Result<(), ReservationError> {
        // Only an open rental may be closed; a replayed return must not
        // check the copy in or settle the rating a second time.
        let open = self
            .reservations
            .get_reservations(user_name, Some(ReservationStatus::Rented))
            .await?;
        if !open.iter().any(|r| r.reservation_uid == reservation_uid) {
            tracing::info!(
                user_name,
                reservation_uid = %reservation_uid,
                "Return rejected: no open rental with this id"
            );
            return Err(ReservationError::NotFound(format!(
                "rented reservation {}",
                reservation_uid
            )));
        }

        let reservation = self
            .reservations
            .update_reservation(reservation_uid, user_name, request.date)
            .await?;

        if reservation.status == ReservationStatus::Rented {
            return Err(ReservationError::Internal(format!(
                "reservation {} is still rented after return",
                reservation_uid
            )));
        }

        let check_in = self
            .catalog
            .check_in(reservation.library_uid, reservation.book_uid, request.condition)
            .await?;

        let penalty = RatingPolicy::penalty(check_in.condition_changed(), reservation.status);

        let rating = self.rating_lookup.get_rating(user_name).await?;
        let stars = RatingPolicy::next_stars(rating.stars, penalty);

        self.ratings.update_rating(user_name, stars).await?;

        tracing::info!(
            user_name,
            reservation_uid = %reservation_uid,
            status = %reservation.status,
            old_condition = %check_in.old_book.condition,
            new_condition = %check_in.new_book.condition,
            penalty,
            old_stars = rating.stars,
            new_stars = stars,
            "Book returned"
        );

        Ok(())
    }

    async fn get_reservations_steps(
        &self,
        user_name: &str,
    ) -> Result<Vec<ReservationDto>, ReservationError> {
        let reservations = self.reservations.get_reservations(user_name, None).await?;
        if reservations.is_empty() {
            return Ok(Vec::new());
        }

        let mut book_uids: Vec<Uuid> = reservations.iter().map(|r| r.book_uid).collect();
        book_uids.sort_unstable();
        book_uids.dedup();

        let books: HashMap<(Uuid, Uuid), BookInfo> = self
            .catalog
            .get_books_by_ids(&book_uids)
            .await?
            .into_iter()
            .map(|info| (info.copy_key(), info))
            .collect();

        let mut result = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            match books.get(&reservation.copy_key()) {
                Some(info) => {
                    let (book, library) = (info.book.clone(), info.library.clone());
                    result.push(ReservationDto::new(reservation, book, library));
                }
                None => tracing::warn!(
                    user_name,
                    reservation_uid = %reservation.reservation_uid,
                    book_uid = %reservation.book_uid,
                    library_uid = %reservation.library_uid,
                    "Catalog has no record for reserved book; skipping reservation"
                ),
            }
        }

        Ok(result)
    }
}

/// Record the outcome of an operation and pass the result through.
fn observed<T>(
    operation: &'static str,
    success: &'static str,
    result: Result<T, ReservationError>,
) -> Result<T, ReservationError> {
    let outcome = match &result {
        Ok(_) => success,
        Err(e) => e.outcome(),
    };
    metrics::record_reservation_outcome(operation, outcome);
    result
}

#[async_trait]
impl<C, V, R> ReservationService for ReservationServiceImpl<C, V, R>
where
    C: CatalogClient + 'static,
    V: ReservationClient + 'static,
    R: RatingClient + 'static,
{
    async fn take_book(
        &self,
        user_name: &str,
        request: TakeBookDto,
    ) -> Result<TakeBookResultDto, ReservationError> {
        observed(
            "take_book",
            "taken",
            self.take_book_steps(user_name, request).await,
        )
    }

    async fn return_book(
        &self,
        user_name: &str,
        reservation_uid: Uuid,
        request: ReturnBookDto,
    ) -> Result<(), ReservationError> {
        observed(
            "return_book",
            "returned",
            self.return_book_steps(user_name, reservation_uid, request)
                .await,
        )
    }

    async fn get_reservations(&self, user_name: &str) -> Result<Vec<ReservationDto>, ReservationError> {
        observed(
            "get_reservations",
            "listed",
            self.get_reservations_steps(user_name).await,
        )
    }
}
