//! Create-item pipeline.
//!
//! ```text
//! Validating ──► Constructing ──► Persisting ──► Done
//!     │               │                │
//!     ▼               ▼                ▼
//!  400 / 500         400              500
//! ```
//!
//! Each stage runs only if the previous one succeeded. Every failure is turned
//! into a [`CommandResponse`] at the stage boundary, so [`CreateTodoItemHandler::handle`]
//! has no error type. Nothing is retried and nothing needs rolling back: the
//! save is the only side effect.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::abort::AbortSignal;
use super::response::{CommandResponse, OutcomeCode};
use super::validation::{CreateTodoItemSpecification, Validator};
use crate::domain::{TodoItem, TodoItemId};
use crate::infrastructure::{RepositoryError, TodoItemRepository};

pub const MESSAGE_CREATED: &str = "item created";
pub const MESSAGE_INVALID_REQUEST: &str = "invalid request";
pub const MESSAGE_VALIDATION_FAULT: &str = "request could not be validated";
pub const MESSAGE_PERSISTENCE_FAILURE: &str = "item could not be saved";
pub const MESSAGE_ABORTED: &str = "request aborted before the item was saved";

// =============================================================================
// Request
// =============================================================================

/// Data needed to create an item. Carries no identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTodoItemRequest {
    /// `None` is treated as an empty title.
    pub title: Option<String>,
    pub is_complete: bool,
}

impl CreateTodoItemRequest {
    #[must_use]
    pub fn new(title: impl Into<String>, is_complete: bool) -> Self {
        Self {
            title: Some(title.into()),
            is_complete,
        }
    }
}

// =============================================================================
// Handler
// =============================================================================

/// Stages of the pipeline, reported in log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validating,
    Constructing,
    Persisting,
    Done,
}

/// Tunables for [`CreateTodoItemHandler`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Upper bound for the save call. `None` waits for the store.
    pub persist_timeout: Option<Duration>,
}

#[derive(Debug, Error)]
enum PersistFailure {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("save did not complete within {0:?}")]
    TimedOut(Duration),

    #[error("aborted")]
    Aborted,
}

/// Validates, builds and saves new to-do items.
///
/// The repository is injected at construction; one handler is shared by all
/// requests.
#[derive(Clone)]
pub struct CreateTodoItemHandler {
    repository: Arc<dyn TodoItemRepository>,
    validator: Arc<dyn Validator<CreateTodoItemRequest>>,
    config: HandlerConfig,
}

impl std::fmt::Debug for CreateTodoItemHandler {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CreateTodoItemHandler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CreateTodoItemHandler {
    /// Creates a handler using [`CreateTodoItemSpecification`] for validation.
    #[must_use]
    pub fn new(repository: Arc<dyn TodoItemRepository>) -> Self {
        Self {
            repository,
            validator: Arc::new(CreateTodoItemSpecification),
            config: HandlerConfig::default(),
        }
    }

    /// Replaces the validator.
    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn Validator<CreateTodoItemRequest>>) -> Self {
        self.validator = validator;
        self
    }

    #[must_use]
    pub const fn with_config(mut self, config: HandlerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Runs the pipeline for one request.
    ///
    /// # Response
    ///
    /// - **201**: item created, `data` holds id, title and completion flag
    /// - **400**: request invalid (with notifications) or rejected by the entity
    /// - **500**: validator fault, save failure, or the save was abandoned
    ///   (abort signal or timeout)
    pub async fn handle(
        &self,
        request: &CreateTodoItemRequest,
        abort: &AbortSignal,
    ) -> CommandResponse {
        if abort.is_aborted() {
            tracing::warn!(stage = ?PipelineStage::Validating, "Request aborted before start");
            return CommandResponse::failure(OutcomeCode::INTERNAL_ERROR, MESSAGE_ABORTED, None);
        }

        // Step 1: Validate
        let validation = match self.validator.validate(request) {
            Ok(validation) => validation,
            Err(fault) => {
                tracing::error!(stage = ?PipelineStage::Validating, %fault, "Validator fault");
                return CommandResponse::failure(
                    OutcomeCode::INTERNAL_ERROR,
                    MESSAGE_VALIDATION_FAULT,
                    None,
                );
            }
        };

        if !validation.is_valid() {
            tracing::debug!(
                stage = ?PipelineStage::Validating,
                notifications = validation.notifications().len(),
                "Request rejected by validation"
            );
            return CommandResponse::failure(
                OutcomeCode::BAD_REQUEST,
                MESSAGE_INVALID_REQUEST,
                Some(validation.into_notifications()),
            );
        }

        // Step 2: Construct
        let title = request.title.clone().unwrap_or_default();
        let item = match TodoItem::create(TodoItemId::generate(), title, request.is_complete) {
            Ok(item) => item,
            Err(error) => {
                tracing::warn!(
                    stage = ?PipelineStage::Constructing,
                    %error,
                    "Validated request violated an entity invariant"
                );
                return CommandResponse::failure(OutcomeCode::BAD_REQUEST, error.to_string(), None);
            }
        };

        // Step 3: Persist
        if let Err(failure) = self.persist(&item, abort).await {
            let message = match failure {
                PersistFailure::Aborted | PersistFailure::TimedOut(_) => {
                    tracing::warn!(
                        stage = ?PipelineStage::Persisting,
                        id = %item.id(),
                        reason = %failure,
                        "Save abandoned"
                    );
                    MESSAGE_ABORTED
                }
                PersistFailure::Repository(_) => {
                    tracing::error!(
                        stage = ?PipelineStage::Persisting,
                        id = %item.id(),
                        error = %failure,
                        "Failed to save item"
                    );
                    MESSAGE_PERSISTENCE_FAILURE
                }
            };
            return CommandResponse::failure(OutcomeCode::INTERNAL_ERROR, message, None);
        }

        // Step 4: Done
        tracing::info!(stage = ?PipelineStage::Done, id = %item.id(), "Item created");
        CommandResponse::created(MESSAGE_CREATED, &item)
    }

    /// Saves `item`, giving up when `abort` fires or the timeout expires.
    ///
    /// Abort wins a tie with a completed save.
    async fn persist(&self, item: &TodoItem, abort: &AbortSignal) -> Result<(), PersistFailure> {
        let save = async {
            let save = self.repository.save(item);
            match self.config.persist_timeout {
                Some(limit) => match tokio::time::timeout(limit, save).await {
                    Ok(result) => result.map_err(PersistFailure::from),
                    Err(_) => Err(PersistFailure::TimedOut(limit)),
                },
                None => save.await.map_err(PersistFailure::from),
            }
        };

        tokio::select! {
            biased;
            () = abort.aborted() => Err(PersistFailure::Aborted),
            result = save => result,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
