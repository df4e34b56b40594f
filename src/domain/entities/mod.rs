//! # Domain Entities
//!
//! Business objects exchanged with the collaborator services.
//!
//! ## Entities
//!
//! - **Reservation**: A book rental record (Rented, Returned, Expired)
//! - **Rating**: A user's star rating, which caps concurrent rentals
//! - **Book / Library**: Catalog records, including copy check-in outcomes
//!
//! ## Client Traits
//!
//! Each collaborator service has a client trait defining the calls the
//! gateway makes. These traits are implemented over HTTP in the
//! infrastructure layer, following the dependency inversion principle.

mod book;
mod rating;
mod reservation;

// Re-export catalog entities and client
pub use book::{Book, BookCheckIn, BookCondition, BookInfo, CatalogClient, Library, LibraryBook};

// Re-export rating entity and client
pub use rating::{Rating, RatingClient};

// Re-export reservation entity and client
pub use reservation::{NewReservation, Reservation, ReservationClient, ReservationStatus};

#[cfg(test)]
pub use book::MockCatalogClient;
#[cfg(test)]
pub use rating::MockRatingClient;
#[cfg(test)]
pub use reservation::MockReservationClient;
