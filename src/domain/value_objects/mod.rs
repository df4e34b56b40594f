//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **Pagination / Page**: Page request and paged result from the catalog

mod page;

pub use page::*;
