//! Shared Utilities
//!
//! Error types used across layers.

pub mod error;
