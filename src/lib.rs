//! User CRUD Service
//!
//! A small REST service exposing create, list, get, update and delete
//! over a single `users` table, built with Axum and SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: The user entity and request/response shapes
//! - **services**: Application use cases
//! - **infra**: Database, repositories and request-scoped sessions
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared types (list windowing)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Create the schema only
//! cargo run -- init-db
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::User;
pub use errors::{AppError, AppResult};
pub use infra::Database;
