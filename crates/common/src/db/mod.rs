//! Database layer for DocForge
//!
//! Provides:
//! - SeaORM entity models
//! - The `DocumentStore` interface and its SeaORM repository
//! - Connection pool management and schema setup

pub mod models;
mod repository;
mod store;

pub use repository::Repository;
pub use store::{DocumentStore, HistoryEntry, NewDocument};

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use models::{ChatHistoryEntity, DocumentEntity};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::info;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database...");

        let mut opts = ConnectOptions::new(&config.url);
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .sqlx_logging(true);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect: {}", e),
            })?;

        info!("Database connection established");

        Ok(Self { conn })
    }

    /// Connect and make sure the schema exists
    pub async fn connect_and_migrate(config: &DatabaseConfig) -> Result<Self> {
        let pool = Self::new(config).await?;
        pool.migrate().await?;
        Ok(pool)
    }

    /// Create the documents and chat_history tables if they are missing
    pub async fn migrate(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut documents = schema.create_table_from_entity(DocumentEntity);
        documents.if_not_exists();
        self.conn.execute(backend.build(&documents)).await?;

        let mut history = schema.create_table_from_entity(ChatHistoryEntity);
        history.if_not_exists();
        self.conn.execute(backend.build(&history)).await?;

        info!("Database schema ready");
        Ok(())
    }

    /// Get the underlying connection
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;

        Ok(())
    }
}
