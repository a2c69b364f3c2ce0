//! Database connection and initialization.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Schema,
    Statement,
};

use crate::config::Config;
use crate::infra::repositories::entities::UserEntity;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the connection pool and create the schema if it is missing.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let db = Self::connect_without_schema(config).await?;
        db.ensure_schema().await?;

        tracing::info!("Database connected and schema ready");

        Ok(db)
    }

    /// Open the connection pool without touching the schema.
    pub async fn connect_without_schema(config: &Config) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(config.database_max_connections)
            .min_connections(1);

        let connection = SeaDatabase::connect(options).await?;
        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Create the `users` table and its indexes when they do not exist yet.
    ///
    /// Existing tables are left untouched; this is not a migration.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(UserEntity);
        table.if_not_exists();
        self.connection.execute(backend.build(&table)).await?;

        for mut index in schema.create_index_from_entity(UserEntity) {
            index.if_not_exists();
            self.connection.execute(backend.build(&index)).await?;
        }

        Ok(())
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
