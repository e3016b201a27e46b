//! Repository port for to-do items.
//!
//! The application layer only needs to durably save a freshly built item, so
//! the port exposes a single operation. Implementations must be safe to call
//! concurrently from independent requests.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{TodoItem, TodoItemId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// An item with the same identity is already stored.
    #[error("Duplicate id: {0}")]
    DuplicateId(TodoItemId),

    /// The backing store rejected the write or could not be reached.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

// =============================================================================
// Todo Item Repository
// =============================================================================

/// Persistence port for [`TodoItem`] aggregates.
#[async_trait]
pub trait TodoItemRepository: Send + Sync {
    /// Durably saves a new item.
    ///
    /// The call either completes or fails; callers do not retry.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::DuplicateId`] if the id is already stored
    /// - [`RepositoryError::DatabaseError`] if the store is unavailable or
    ///   rejects the write
    async fn save(&self, item: &TodoItem) -> Result<(), RepositoryError>;
}

// =============================================================================
// Tests
// =============================================================================
