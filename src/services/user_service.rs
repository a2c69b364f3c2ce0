//! User service - Handles user-related business logic.
//!
//! Every operation is one independent unit of work against the store.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ENTITY_USER;
use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::ListParams;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user; fails with a conflict when the email is taken
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// List users in insertion order, windowed by skip/limit
    async fn list_users(&self, params: ListParams) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Update only the supplied fields of a user
    async fn update_user(&self, id: i32, changes: UpdateUser) -> AppResult<User>;

    /// Permanently delete a user, returning its last state
    async fn delete_user(&self, id: i32) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let user = self.uow.users().create(input).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn list_users(&self, params: ListParams) -> AppResult<Vec<User>> {
        self.uow
            .users()
            .list(params.offset(), params.limit())
            .await
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found(ENTITY_USER)
    }

    async fn update_user(&self, id: i32, changes: UpdateUser) -> AppResult<User> {
        let user = self.uow.users().update(id, changes).await?;
        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> AppResult<User> {
        let user = self.uow.users().delete(id).await?;
        tracing::info!(user_id = user.id, "User deleted");
        Ok(user)
    }
}
