//! In-memory repository implementation.
//!
//! Suitable for tests and local development. Items live in a `HashMap`
//! behind a `tokio` read/write lock, so one instance can be shared by every
//! request handler.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{TodoItem, TodoItemId};
use crate::infrastructure::{RepositoryError, TodoItemRepository};

/// In-memory implementation of [`TodoItemRepository`].
///
/// Cloning is cheap and clones share the same storage.
///
/// # Example
///
/// ```ignore
/// let repository = InMemoryTodoItemRepository::new();
/// let item = TodoItem::open(TodoItemId::generate(), "Buy milk")?;
///
/// repository.save(&item).await?;
/// assert_eq!(repository.len().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoItemRepository {
    items: Arc<RwLock<HashMap<TodoItemId, TodoItem>>>,
}

impl InMemoryTodoItemRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the stored item with the given id.
    pub async fn get(&self, id: &TodoItemId) -> Option<TodoItem> {
        self.items.read().await.get(id).cloned()
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl TodoItemRepository for InMemoryTodoItemRepository {
    async fn save(&self, item: &TodoItem) -> Result<(), RepositoryError> {
        let mut guard = self.items.write().await;

        if guard.contains_key(&item.id()) {
            return Err(RepositoryError::DuplicateId(item.id()));
        }

        guard.insert(item.id(), item.clone());
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn test_item(title: &str) -> TodoItem {
        TodoItem::open(TodoItemId::generate(), title).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_new_repository_is_empty() {
        let repository = InMemoryTodoItemRepository::new();

        assert!(repository.is_empty().await);
        assert_eq!(repository.len().await, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_save_and_get() {
        let repository = InMemoryTodoItemRepository::new();
        let item = test_item("Buy milk");

        let result = repository.save(&item).await;
        assert!(result.is_ok());

        let found = repository.get(&item.id()).await;
        assert_eq!(found, Some(item));
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_unknown_id_returns_none() {
        let repository = InMemoryTodoItemRepository::new();
        assert!(repository.get(&TodoItemId::generate()).await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_save_rejects_duplicate_id() {
        let repository = InMemoryTodoItemRepository::new();
        let item = test_item("Buy milk");
        repository.save(&item).await.unwrap();

        let duplicate = TodoItem::create(item.id(), "Buy bread", true).unwrap();
        let result = repository.save(&duplicate).await;

        assert_eq!(result, Err(RepositoryError::DuplicateId(item.id())));
        assert_eq!(repository.get(&item.id()).await.unwrap().title(), "Buy milk");
    }

    #[rstest]
    #[tokio::test]
    async fn test_clones_share_storage() {
        let repository = InMemoryTodoItemRepository::new();
        let clone = repository.clone();

        clone.save(&test_item("Shared item")).await.unwrap();

        assert_eq!(repository.len().await, 1);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_are_all_kept() {
        let repository = InMemoryTodoItemRepository::new();

        let handles: Vec<_> = (0..32)
            .map(|index| {
                let repository = repository.clone();
                tokio::spawn(async move {
                    repository
                        .save(&test_item(&format!("Concurrent item {index}")))
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(repository.len().await, 32);
    }
}
