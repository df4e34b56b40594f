//! # Library Gateway
//!
//! This crate provides the public HTTP entry point of a book rental system:
//! - RESTful endpoints for browsing libraries and renting books
//! - Orchestration of the library, rating and reservation services
//! - Compensation when a multi-service rental step fails
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, the rating policy and collaborator client traits
//! - **Application Layer**: Orchestration services and DTOs
//! - **Infrastructure Layer**: HTTP collaborator clients and metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! library_gateway/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, client traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ HTTP clients and Prometheus metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common error types
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
