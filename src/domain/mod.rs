//! # Domain Layer
//!
//! The domain layer contains the business rules of the library gateway.
//! It is independent of any transport or framework concerns.
//!
//! ## Structure
//!
//! - **entities**: Reservation, Rating, Book and Library, plus the client
//!   traits for the services that own them
//! - **value_objects**: Paging and tag types
//! - **services**: Rental limit and return penalty rules
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Client traits define collaborator contracts
//! - Pure functions for the rating rules

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
