//! Request validation with collected notifications.
//!
//! Every rule of a specification is evaluated, and each failing rule adds a
//! [`Notification`]. A request is valid when no notification was raised.
//!
//! # Rules for creating an item
//!
//! - Title must be shorter than 160 characters
//! - Title must be longer than 3 characters
//!
//! Lengths are counted in characters; an absent title counts as empty.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::create_todo_item::CreateTodoItemRequest;
use crate::domain::TITLE_MAX_CHARS;

/// Titles must have strictly more characters than this.
pub const TITLE_MIN_EXCLUSIVE: usize = 3;

// =============================================================================
// Notifications
// =============================================================================

/// One failed rule: the offending field and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub key: String,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Outcome of evaluating a specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    notifications: Vec<Notification>,
}

impl ValidationResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a notification unless `condition` holds.
    #[must_use]
    pub fn requires(
        mut self,
        condition: bool,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        if !condition {
            self.notifications.push(Notification::new(key, message));
        }
        self
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.notifications.is_empty()
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    #[must_use]
    pub fn into_notifications(self) -> Vec<Notification> {
        self.notifications
    }
}

// =============================================================================
// Validator
// =============================================================================

/// The validation stage itself broke down, as opposed to finding invalid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validator fault: {0}")]
pub struct ValidatorFault(pub String);

/// Checks a request against a fixed rule set.
pub trait Validator<R>: Send + Sync {
    /// Evaluates every rule against `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorFault`] only when the rules could not be evaluated.
    /// Invalid content is reported through the returned [`ValidationResult`].
    fn validate(&self, request: &R) -> Result<ValidationResult, ValidatorFault>;
}

/// Rules for [`CreateTodoItemRequest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateTodoItemSpecification;

impl CreateTodoItemSpecification {
    /// Evaluates the title rules. Both are always checked.
    #[must_use]
    pub fn evaluate(request: &CreateTodoItemRequest) -> ValidationResult {
        let length = request.title.as_deref().map_or(0, |title| title.chars().count());

        ValidationResult::new()
            .requires(
                length < TITLE_MAX_CHARS,
                "title",
                format!("title is too long: must be shorter than {TITLE_MAX_CHARS} characters"),
            )
            .requires(
                length > TITLE_MIN_EXCLUSIVE,
                "title",
                format!("title is too short: must be longer than {TITLE_MIN_EXCLUSIVE} characters"),
            )
    }
}

impl Validator<CreateTodoItemRequest> for CreateTodoItemSpecification {
    fn validate(
        &self,
        request: &CreateTodoItemRequest,
    ) -> Result<ValidationResult, ValidatorFault> {
        Ok(Self::evaluate(request))
    }
}

// =============================================================================
// Tests
// =============================================================================
