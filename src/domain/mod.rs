//! Domain module for to-do items.
//!
//! This module contains the aggregate and its identity value object.

pub mod todo_item;

pub use todo_item::{DomainError, TITLE_MAX_CHARS, TodoItem, TodoItemId};
