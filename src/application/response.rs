//! Uniform response envelope.
//!
//! Every outcome of the create pipeline, success or failure, is reported as a
//! [`CommandResponse`]. Its `data` payload is present exactly when the status
//! is in the success range; the constructors are the only way to build one, so
//! the two can never disagree.

use serde::{Deserialize, Serialize};

use super::validation::Notification;
use crate::domain::{TodoItem, TodoItemId};

// =============================================================================
// Outcome Code
// =============================================================================

/// Outcome of a command, expressed with HTTP status semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeCode(u16);

impl OutcomeCode {
    pub const CREATED: Self = Self(201);
    pub const BAD_REQUEST: Self = Self(400);
    pub const PAYLOAD_TOO_LARGE: Self = Self(413);
    pub const INTERNAL_ERROR: Self = Self(500);

    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// `true` for codes in `200..=299`.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 <= 299
    }
}

// =============================================================================
// Payload
// =============================================================================

/// Snapshot of a created item returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItemData {
    pub id: TodoItemId,
    pub title: String,
    pub is_complete: bool,
}

impl From<&TodoItem> for TodoItemData {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id(),
            title: item.title().to_string(),
            is_complete: item.is_complete(),
        }
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// Response envelope for the create pipeline.
///
/// # Example JSON
///
/// ```json
/// {
///   "message": "item created",
///   "status": 201,
///   "success": true,
///   "data": { "id": "0190...", "title": "Buy milk", "is_complete": false }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResponse {
    message: String,
    status: OutcomeCode,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    notifications: Option<Vec<Notification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<TodoItemData>,
}

impl CommandResponse {
    /// Successful creation: status 201 with the item's data.
    #[must_use]
    pub fn created(message: impl Into<String>, item: &TodoItem) -> Self {
        Self {
            message: message.into(),
            status: OutcomeCode::CREATED,
            success: true,
            notifications: None,
            data: Some(TodoItemData::from(item)),
        }
    }

    /// Failed command. Never carries data.
    ///
    /// A `status` in the success range is coerced to
    /// [`OutcomeCode::INTERNAL_ERROR`], since a failure without data cannot
    /// be reported as a success.
    #[must_use]
    pub fn failure(
        status: OutcomeCode,
        message: impl Into<String>,
        notifications: Option<Vec<Notification>>,
    ) -> Self {
        let status = if status.is_success() {
            OutcomeCode::INTERNAL_ERROR
        } else {
            status
        };

        Self {
            message: message.into(),
            status,
            success: false,
            notifications,
            data: None,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn status(&self) -> OutcomeCode {
        self.status
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn notifications(&self) -> Option<&[Notification]> {
        self.notifications.as_deref()
    }

    #[must_use]
    pub const fn data(&self) -> Option<&TodoItemData> {
        self.data.as_ref()
    }
}

// =============================================================================
// Tests
// =============================================================================
