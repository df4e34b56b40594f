//! Application Layer
//!
//! Contains the orchestration services and data transfer objects (DTOs).
//! This layer coordinates the collaborator clients on behalf of the
//! presentation layer.

pub mod services;
pub mod dto;
