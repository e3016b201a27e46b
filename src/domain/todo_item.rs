//! To-do item domain model.
//!
//! The aggregate is plain data: an identity value object, a title and a
//! completion flag. Identity is assigned once by the caller of
//! [`TodoItem::create`] and cannot be changed afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Upper bound on the number of characters a title may hold.
///
/// Matches the `VARCHAR(160)` column of the `todo_items` table. A title must be
/// strictly shorter than this.
pub const TITLE_MAX_CHARS: usize = 160;

// =============================================================================
// Domain Error
// =============================================================================

/// Errors raised while constructing a [`TodoItem`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The title has no characters at all.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title does not fit in the storage column.
    #[error("title must be shorter than {max} characters, got {actual}")]
    TitleTooLong { max: usize, actual: usize },
}

// =============================================================================
// Value Objects
// =============================================================================

/// Unique identifier for a to-do item.
///
/// Newtype over a UUID so that ids cannot be mixed up with other UUID-keyed
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoItemId(Uuid);

impl TodoItemId {
    /// Wraps an existing UUID. Does not generate anything.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Generates a fresh time-ordered identifier (UUID v7).
    ///
    /// **Note**: impure (clock + randomness).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for TodoItemId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for TodoItemId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(value).map(Self)
    }
}

// =============================================================================
// Aggregate
// =============================================================================

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    id: TodoItemId,
    title: String,
    is_complete: bool,
}

impl TodoItem {
    /// Builds a new item, checking the entity invariants.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EmptyTitle`] if the title is empty
    /// - [`DomainError::TitleTooLong`] if the title has [`TITLE_MAX_CHARS`]
    ///   characters or more
    pub fn create(
        id: TodoItemId,
        title: impl Into<String>,
        is_complete: bool,
    ) -> Result<Self, DomainError> {
        let title = title.into();

        if title.is_empty() {
            return Err(DomainError::EmptyTitle);
        }

        let actual = title.chars().count();
        if actual >= TITLE_MAX_CHARS {
            return Err(DomainError::TitleTooLong {
                max: TITLE_MAX_CHARS,
                actual,
            });
        }

        Ok(Self {
            id,
            title,
            is_complete,
        })
    }

    /// Builds an open (not yet completed) item.
    ///
    /// # Errors
    ///
    /// Same as [`TodoItem::create`].
    pub fn open(id: TodoItemId, title: impl Into<String>) -> Result<Self, DomainError> {
        Self::create(id, title, false)
    }

    #[must_use]
    pub const fn id(&self) -> TodoItemId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.is_complete
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_generate_produces_distinct_ids() {
        let first = TodoItemId::generate();
        let second = TodoItemId::generate();
        assert_ne!(first, second);
    }

    #[rstest]
    fn test_id_display_and_parse_agree() {
        let id = TodoItemId::generate();
        let parsed: TodoItemId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[rstest]
    fn test_id_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<TodoItemId>().is_err());
    }

    #[rstest]
    fn test_id_serializes_as_plain_string() {
        let uuid = Uuid::nil();
        let json = serde_json::to_string(&TodoItemId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[rstest]
    fn test_create_keeps_fields() {
        let id = TodoItemId::generate();
        let item = TodoItem::create(id, "Buy milk", true).unwrap();

        assert_eq!(item.id(), id);
        assert_eq!(item.title(), "Buy milk");
        assert!(item.is_complete());
    }

    #[rstest]
    fn test_open_defaults_to_incomplete() {
        let item = TodoItem::open(TodoItemId::generate(), "Walk the dog").unwrap();
        assert!(!item.is_complete());
    }

    #[rstest]
    fn test_create_rejects_empty_title() {
        let result = TodoItem::create(TodoItemId::generate(), "", false);
        assert_eq!(result, Err(DomainError::EmptyTitle));
    }

    #[rstest]
    #[case("    ")]
    #[case("\t\n")]
    #[case("\u{3000}\u{3000}\u{3000}\u{3000}")]
    fn test_create_keeps_whitespace_title(#[case] title: &str) {
        let item = TodoItem::create(TodoItemId::generate(), title, false).unwrap();
        assert_eq!(item.title(), title);
    }

    #[rstest]
    fn test_create_rejects_title_at_column_limit() {
        let title = "a".repeat(TITLE_MAX_CHARS);
        let result = TodoItem::create(TodoItemId::generate(), title, false);
        assert_eq!(
            result,
            Err(DomainError::TitleTooLong {
                max: TITLE_MAX_CHARS,
                actual: TITLE_MAX_CHARS,
            })
        );
    }

    #[rstest]
    fn test_create_accepts_title_just_under_limit() {
        let title = "a".repeat(TITLE_MAX_CHARS - 1);
        assert!(TodoItem::create(TodoItemId::generate(), title, false).is_ok());
    }

    #[rstest]
    fn test_title_length_counts_characters_not_bytes() {
        // 159 two-byte characters: 318 bytes, still under the limit.
        let title = "é".repeat(TITLE_MAX_CHARS - 1);
        assert!(TodoItem::create(TodoItemId::generate(), title, false).is_ok());
    }

    #[rstest]
    fn test_domain_error_messages() {
        assert_eq!(DomainError::EmptyTitle.to_string(), "title must not be empty");
        assert_eq!(
            DomainError::TitleTooLong {
                max: 160,
                actual: 200
            }
            .to_string(),
            "title must be shorter than 160 characters, got 200"
        );
    }
}
