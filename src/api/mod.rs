//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{CreateTodoItemBody, HealthResponse};
pub use handlers::{
    AppState, MESSAGE_BODY_TOO_LARGE, MESSAGE_INVALID_BODY, create_todo_item, health_check,
};
pub use routes::{HEALTH_PATH, TODOS_PATH, create_router};
