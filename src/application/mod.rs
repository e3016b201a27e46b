//! Application layer: the create-item pipeline and its supporting types.

pub mod abort;
pub mod create_todo_item;
pub mod response;
pub mod validation;

pub use abort::{AbortHandle, AbortSignal, abort_pair};
pub use create_todo_item::{
    CreateTodoItemHandler, CreateTodoItemRequest, HandlerConfig, MESSAGE_ABORTED,
    MESSAGE_CREATED, MESSAGE_INVALID_REQUEST, MESSAGE_PERSISTENCE_FAILURE,
    MESSAGE_VALIDATION_FAULT, PipelineStage,
};
pub use response::{CommandResponse, OutcomeCode, TodoItemData};
pub use validation::{
    CreateTodoItemSpecification, Notification, ValidationResult, Validator, ValidatorFault,
};
