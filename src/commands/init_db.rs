//! Init-db command - Creates the database schema without serving.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the init-db command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Initializing database schema...");

    let db = Database::connect_without_schema(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    db.ensure_schema()
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;

    tracing::info!("Database schema ready");
    Ok(())
}
