//! Domain Services
//!
//! Stateless business rules that do not belong to a single entity.

mod rating_policy;

pub use rating_policy::RatingPolicy;
