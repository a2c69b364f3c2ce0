//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect, Set,
    SqlErr,
};

use super::entities::{user, UserActiveModel, UserEntity};
use crate::config::ENTITY_USER;
use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::unit_of_work::scoped;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Each method is one unit of work executed in its own session.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; the store assigns the identifier
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// List users in insertion order, windowed by offset/limit
    async fn list(&self, offset: u64, limit: u64) -> AppResult<Vec<User>>;

    /// Overwrite the supplied fields of an existing user
    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<User>;

    /// Permanently delete a user, returning the row as it was
    async fn delete(&self, id: i32) -> AppResult<User>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a write failure, turning a unique-email violation into a conflict.
fn map_write_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint violated: {}", detail);
            AppError::conflict(format!("{} with this email", ENTITY_USER))
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, input: CreateUser) -> AppResult<User> {
        scoped(&self.db, move |txn| {
            Box::pin(async move {
                let active_model = UserActiveModel {
                    name: Set(input.name),
                    email: Set(input.email),
                    ..Default::default()
                };

                let model = active_model.insert(txn).await.map_err(map_write_err)?;
                Ok(User::from(model))
            })
        })
        .await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        scoped(&self.db, move |txn| {
            Box::pin(async move {
                let result = UserEntity::find_by_id(id).one(txn).await?;
                Ok(result.map(User::from))
            })
        })
        .await
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<Vec<User>> {
        scoped(&self.db, move |txn| {
            Box::pin(async move {
                let models = UserEntity::find()
                    .order_by_asc(user::Column::Id)
                    .offset(offset)
                    .limit(limit)
                    .all(txn)
                    .await?;

                Ok(models.into_iter().map(User::from).collect())
            })
        })
        .await
    }

    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<User> {
        scoped(&self.db, move |txn| {
            Box::pin(async move {
                let model = UserEntity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_not_found(ENTITY_USER)?;

                if changes.is_empty() {
                    return Ok(User::from(model));
                }

                let mut active: UserActiveModel = model.into();

                if let Some(name) = changes.name {
                    active.name = Set(name);
                }
                if let Some(email) = changes.email {
                    active.email = Set(email);
                }

                let model = active.update(txn).await.map_err(map_write_err)?;
                Ok(User::from(model))
            })
        })
        .await
    }

    async fn delete(&self, id: i32) -> AppResult<User> {
        scoped(&self.db, move |txn| {
            Box::pin(async move {
                let model = UserEntity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_not_found(ENTITY_USER)?;

                let result = UserEntity::delete_by_id(id).exec(txn).await?;
                if result.rows_affected == 0 {
                    return Err(AppError::not_found(ENTITY_USER));
                }

                Ok(User::from(model))
            })
        })
        .await
    }
}
