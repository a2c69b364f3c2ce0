//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and schema bootstrap
//! - Repositories
//! - Request-scoped sessions (Unit of Work)

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::Database;
pub use repositories::{UserRepository, UserStore};
pub use unit_of_work::{scoped, Persistence, SessionFuture, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
