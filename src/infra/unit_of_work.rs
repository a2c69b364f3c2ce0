//! Unit of Work pattern implementation.
//!
//! The store handle is created once at startup and injected into services
//! through [`UnitOfWork`]. Every repository operation runs inside a
//! request-scoped session opened by [`scoped`]: a transaction that is
//! committed when the operation succeeds and rolled back when it fails, so
//! the underlying pooled connection is released on every exit path.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::repositories::{UserRepository, UserStore};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by a session body, borrowing the session's transaction.
pub type SessionFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db));
        Self { user_repo }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }
}

/// Run `f` inside a request-scoped session.
///
/// The transaction is committed if `f` succeeds and rolled back otherwise.
pub async fn scoped<F, T>(db: &DatabaseConnection, f: F) -> AppResult<T>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> SessionFuture<'a, T> + Send,
    T: Send,
{
    let txn = db.begin().await.map_err(AppError::from)?;

    match f(&txn).await {
        Ok(result) => {
            txn.commit().await.map_err(AppError::from)?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Session rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}
