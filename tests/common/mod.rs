//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate. Helpers used only by one test
//! file would otherwise generate dead code warnings in the others.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use todo_service::api::{AppState, TODOS_PATH, create_router};
use todo_service::application::{AbortSignal, CreateTodoItemHandler};
use todo_service::domain::TodoItem;
use todo_service::infrastructure::{
    InMemoryTodoItemRepository, RepositoryError, TodoItemRepository,
};

// =============================================================================
// Repositories
// =============================================================================

/// Repository whose every save fails with a database error.
pub struct FailingRepository;

#[async_trait]
impl TodoItemRepository for FailingRepository {
    async fn save(&self, _item: &TodoItem) -> Result<(), RepositoryError> {
        Err(RepositoryError::DatabaseError(
            "password authentication failed for user \"todo\"".to_string(),
        ))
    }
}

// =============================================================================
// Router Helpers
// =============================================================================

/// Router backed by the given repository, with a signal that never fires.
pub fn create_test_router(repository: Arc<dyn TodoItemRepository>) -> Router {
    let handler = CreateTodoItemHandler::new(repository);
    create_router(AppState::new(handler, AbortSignal::never()))
}

/// Router backed by a fresh in-memory repository, returned for inspection.
pub fn create_in_memory_router() -> (Router, InMemoryTodoItemRepository) {
    let repository = InMemoryTodoItemRepository::new();
    (create_test_router(Arc::new(repository.clone())), repository)
}

/// Sends `body` as a JSON `POST /v1/todos`.
pub async fn post_todo(router: Router, body: impl Into<String>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(TODOS_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap();

    router.oneshot(request).await.unwrap()
}

/// Collects the response body and parses it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
