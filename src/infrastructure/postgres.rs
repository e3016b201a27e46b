//! `PostgreSQL` repository implementation.
//!
//! Items are stored one row per item in the `todo_items` table using a
//! `sqlx::PgPool`, which makes the repository safe to share across requests.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS todo_items (
//!     id UUID PRIMARY KEY,
//!     title VARCHAR(160) NOT NULL,
//!     is_complete BOOLEAN NOT NULL DEFAULT FALSE
//! );
//! ```

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::domain::TodoItem;
use crate::infrastructure::{RepositoryError, TodoItemRepository};

/// DDL for the `todo_items` table, applied by [`PostgresTodoItemRepository::ensure_schema`].
pub const CREATE_TODO_ITEMS_TABLE: &str = "CREATE TABLE IF NOT EXISTS todo_items (
    id UUID PRIMARY KEY,
    title VARCHAR(160) NOT NULL,
    is_complete BOOLEAN NOT NULL DEFAULT FALSE
)";

const INSERT_TODO_ITEM: &str = "INSERT INTO todo_items (id, title, is_complete) VALUES ($1, $2, $3)";

/// Connects a pool to the given database.
///
/// # Errors
///
/// Returns `RepositoryError::DatabaseError` if no connection can be established
/// within `acquire_timeout`.
pub async fn connect_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, RepositoryError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
        .map_err(|error| RepositoryError::DatabaseError(error.to_string()))
}

/// `PostgreSQL` implementation of [`TodoItemRepository`].
///
/// # Example
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/todos").await?;
/// let repository = PostgresTodoItemRepository::new(pool);
/// repository.ensure_schema().await?;
///
/// let item = TodoItem::open(TodoItemId::generate(), "Buy milk")?;
/// repository.save(&item).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresTodoItemRepository {
    pool: PgPool,
}

impl PostgresTodoItemRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `todo_items` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DatabaseError` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TODO_ITEMS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|error| RepositoryError::DatabaseError(error.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl TodoItemRepository for PostgresTodoItemRepository {
    async fn save(&self, item: &TodoItem) -> Result<(), RepositoryError> {
        sqlx::query(INSERT_TODO_ITEM)
            .bind(*item.id().as_uuid())
            .bind(item.title())
            .bind(item.is_complete())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                if error
                    .as_database_error()
                    .is_some_and(|database_error| database_error.is_unique_violation())
                {
                    RepositoryError::DuplicateId(item.id())
                } else {
                    RepositoryError::DatabaseError(error.to_string())
                }
            })?;

        Ok(())
    }
}
