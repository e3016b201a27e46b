//! Infrastructure module for external services.
//!
//! This module contains the repository port, its in-memory and `PostgreSQL`
//! implementations, configuration loading and backend selection.

pub mod config;
pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use config::{AppConfig, ConfigurationError, LogFormat, StorageConfig, StorageMode};
pub use factory::{FactoryError, RepositoryFactory};
pub use in_memory::InMemoryTodoItemRepository;
pub use postgres::PostgresTodoItemRepository;
pub use repository::{RepositoryError, TodoItemRepository};
