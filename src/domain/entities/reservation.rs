//! Reservation entity and the reservation client trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::UpstreamError;

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// The book is out with the user.
    Rented,
    /// The book came back on or before the due date.
    Returned,
    /// The book came back after the due date.
    Expired,
}

impl ReservationStatus {
    /// Tag as written in logs; matches the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rented => "RENTED",
            Self::Returned => "RETURNED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A book rental record kept by the reservation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub reservation_uid: Uuid,
    pub user_name: String,
    pub book_uid: Uuid,
    pub library_uid: Uuid,
    pub status: ReservationStatus,
    pub start_date: NaiveDate,
    pub till_date: NaiveDate,
}

impl Reservation {
    /// `(book_uid, library_uid)` of the rented copy.
    pub fn copy_key(&self) -> (Uuid, Uuid) {
        (self.book_uid, self.library_uid)
    }
}

/// Input for creating a reservation.
///
/// `reservation_uid` is minted by the gateway so that a retried create is
/// recognisable by the store. `rented_limit` lets a store that supports it
/// re-check the rental limit atomically and answer 409 when it is exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub reservation_uid: Uuid,
    pub user_name: String,
    pub book_uid: Uuid,
    pub library_uid: Uuid,
    pub start_date: NaiveDate,
    pub till_date: NaiveDate,
    pub rented_limit: i32,
}

/// Client for the reservation service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationClient: Send + Sync {
    /// All reservations of a user, optionally restricted to one status.
    async fn get_reservations(
        &self,
        user_name: &str,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, UpstreamError>;

    /// Create a reservation in the `Rented` state.
    async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, UpstreamError>;

    /// Close a reservation. The store decides between `Returned` and
    /// `Expired` by comparing `return_date` with the due date.
    async fn update_reservation(
        &self,
        reservation_uid: Uuid,
        user_name: &str,
        return_date: NaiveDate,
    ) -> Result<Reservation, UpstreamError>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), UpstreamError>;
}
