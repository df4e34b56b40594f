//! HTTP API
//!
//! Routes, handlers and extractors for the REST surface.

pub mod extractors;
pub mod handlers;
pub mod routes;
