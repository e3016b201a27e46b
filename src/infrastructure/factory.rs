//! Repository factory for runtime backend selection.
//!
//! Picks the in-memory or `PostgreSQL` backend from [`StorageConfig`] and hands
//! it out as a trait object, so the rest of the application never names a
//! concrete store.
//!
//! # Example
//!
//! ```ignore
//! let config = AppConfig::from_env()?;
//! let repository = RepositoryFactory::new(config.storage).create().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::config::{StorageConfig, StorageMode};
use super::postgres::connect_pool;
use super::{
    InMemoryTodoItemRepository, PostgresTodoItemRepository, RepositoryError, TodoItemRepository,
};

/// How long startup waits for the first database connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while building a repository.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("DATABASE_URL is required for PostgreSQL storage")]
    MissingDatabaseUrl,

    #[error("Failed to connect to PostgreSQL: {0}")]
    Connection(RepositoryError),

    #[error("Failed to prepare the todo_items table: {0}")]
    Schema(RepositoryError),
}

/// Builds the configured [`TodoItemRepository`].
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: StorageConfig,
}

impl RepositoryFactory {
    #[must_use]
    pub const fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Creates the repository.
    ///
    /// For `PostgreSQL` this connects the pool and makes sure the
    /// `todo_items` table exists.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the database URL is missing, the connection
    /// fails, or the schema cannot be created.
    pub async fn create(&self) -> Result<Arc<dyn TodoItemRepository>, FactoryError> {
        match self.config.mode {
            StorageMode::InMemory => {
                tracing::info!("Using in-memory storage");
                Ok(Arc::new(InMemoryTodoItemRepository::new()))
            }
            StorageMode::Postgres => {
                let database_url = self
                    .config
                    .database_url
                    .as_deref()
                    .ok_or(FactoryError::MissingDatabaseUrl)?;

                let pool = connect_pool(database_url, self.config.max_connections, CONNECT_TIMEOUT)
                    .await
                    .map_err(FactoryError::Connection)?;

                let repository = PostgresTodoItemRepository::new(pool);
                repository
                    .ensure_schema()
                    .await
                    .map_err(FactoryError::Schema)?;

                tracing::info!(
                    max_connections = self.config.max_connections,
                    "Using PostgreSQL storage"
                );
                Ok(Arc::new(repository))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
