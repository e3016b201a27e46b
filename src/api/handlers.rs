//! HTTP handlers for the to-do API.
//!
//! Handlers are thin: they translate the HTTP request into a
//! [`CreateTodoItemRequest`], run the pipeline and map the envelope back onto
//! the transport. The envelope's status becomes the HTTP status.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use super::dto::{CreateTodoItemBody, HealthResponse};
use super::routes::TODOS_PATH;
use crate::application::{
    AbortSignal, CommandResponse, CreateTodoItemHandler, CreateTodoItemRequest, OutcomeCode,
};
use crate::domain::TodoItemId;

/// Message used when the body cannot be parsed as a create request.
pub const MESSAGE_INVALID_BODY: &str = "invalid request body";

/// Message used when the body exceeds the extractor's size limit.
pub const MESSAGE_BODY_TOO_LARGE: &str = "request body too large";

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Create-item pipeline, shared by all requests.
    pub handler: Arc<CreateTodoItemHandler>,
    /// Fires when the server begins shutting down.
    pub shutdown: AbortSignal,
}

impl AppState {
    #[must_use]
    pub fn new(handler: CreateTodoItemHandler, shutdown: AbortSignal) -> Self {
        Self {
            handler: Arc::new(handler),
            shutdown,
        }
    }
}

// =============================================================================
// POST /v1/todos Handler
// =============================================================================

/// Creates a new to-do item.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Buy milk",
///   "is_complete": false
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: item created, `Location` points at the new item
/// - **400 Bad Request**: malformed body, invalid request or entity rule violated
/// - **413 Payload Too Large**: body over the size limit
/// - **500 Internal Server Error**: validation fault, save failure or abort
///
/// The body is always a [`CommandResponse`] envelope.
pub async fn create_todo_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoItemBody>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(body)) => CreateTodoItemRequest::from(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected request body");
            return envelope_response(rejection_envelope(&rejection));
        }
    };

    let response = state.handler.handle(&request, &state.shutdown).await;
    envelope_response(response)
}

fn rejection_envelope(rejection: &JsonRejection) -> CommandResponse {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        CommandResponse::failure(OutcomeCode::PAYLOAD_TOO_LARGE, MESSAGE_BODY_TOO_LARGE, None)
    } else {
        CommandResponse::failure(OutcomeCode::BAD_REQUEST, MESSAGE_INVALID_BODY, None)
    }
}

fn envelope_response(response: CommandResponse) -> Response {
    let status = StatusCode::from_u16(response.status().as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match response.data().map(|data| location_of(data.id)) {
        Some(location) => (status, [(header::LOCATION, location)], Json(response)).into_response(),
        None => (status, Json(response)).into_response(),
    }
}

fn location_of(id: TodoItemId) -> String {
    format!("{TODOS_PATH}/{id}")
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check endpoint.
///
/// # Response
///
/// - **200 OK**: Service is healthy
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================
