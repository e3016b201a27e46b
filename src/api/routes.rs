//! Route table.

use axum::Router;
use axum::routing::{get, post};

use super::handlers::{AppState, create_todo_item, health_check};

pub const TODOS_PATH: &str = "/v1/todos";
pub const HEALTH_PATH: &str = "/health";

/// Builds the application router.
///
/// Middleware (tracing, CORS) is added by the caller.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(TODOS_PATH, post(create_todo_item))
        .route(HEALTH_PATH, get(health_check))
        .with_state(state)
}
