//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `init-db` - Create the database schema and exit

pub mod args;

pub use args::{Cli, Commands};
