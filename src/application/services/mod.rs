//! Application Services
//!
//! Business logic services that coordinate the collaborator clients.
//!
//! ## Available Services
//!
//! - **ReservationService**: Take and return books, list reservations
//! - **RatingService**: User rating lookup
//! - **LibraryService**: Library and book browsing

pub mod reservation_service;
pub mod rating_service;
pub mod library_service;

// Re-export reservation service types
pub use reservation_service::{
    ReservationDto, ReservationError, ReservationService, ReservationServiceImpl, ReturnBookDto,
    TakeBookDto, TakeBookResultDto,
};

// Re-export rating service types
pub use rating_service::{RatingDto, RatingError, RatingService, RatingServiceImpl};

// Re-export library service types
pub use library_service::{LibraryError, LibraryService, LibraryServiceImpl};
