//! Data Transfer Objects for API requests and responses.
//!
//! The response side of the create endpoint is the application envelope
//! itself, serialized as-is.

use serde::{Deserialize, Serialize};

use crate::application::CreateTodoItemRequest;

// =============================================================================
// Request DTOs
// =============================================================================

/// Request body for `POST /v1/todos`.
///
/// Both fields are optional on the wire. A missing title is reported by
/// validation, not by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoItemBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_complete: bool,
}

impl From<CreateTodoItemBody> for CreateTodoItemRequest {
    fn from(body: CreateTodoItemBody) -> Self {
        Self {
            title: body.title,
            is_complete: body.is_complete,
        }
    }
}

// =============================================================================
// Response DTOs
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}
