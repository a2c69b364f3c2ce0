//! Application state - Dependency injection container.
//!
//! Holds the store handle and the services built on top of it. Created once
//! at startup and cloned into every request.

use std::sync::Arc;

use crate::infra::{Database, Persistence};
use crate::services::{UserManager, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database handle.
    ///
    /// Wires the Unit of Work and user service on top of the shared pool.
    pub fn from_database(database: Arc<Database>) -> Self {
        let uow = Arc::new(Persistence::new(database.get_connection()));
        let user_service = Arc::new(UserManager::new(uow));

        Self {
            user_service,
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(user_service: Arc<dyn UserService>, database: Arc<Database>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
