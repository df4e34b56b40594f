//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - HTTP clients for the library, rating and reservation services
//! - Prometheus metrics

pub mod clients;
pub mod metrics;
