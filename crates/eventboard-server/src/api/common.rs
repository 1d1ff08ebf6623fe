// Common DTOs for public API
//
// These types are shared across the category and event endpoints.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Error type returned by every JSON handler.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Log a failed operation and turn it into a 500 carrying the error text.
pub fn internal_error(action: &str, err: anyhow::Error) -> ApiError {
    tracing::error!(error = %err, "Failed to {}", action);
    ErrorResponse::new(err.to_string()).into_response(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Plain status message, used for update results and "not found" answers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "Update successfully")]
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Acknowledgement of a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResponse {
    pub fn one() -> Self {
        Self {
            acknowledged: true,
            deleted_count: 1,
        }
    }
}

/// Result of a delete: the acknowledgement or a "not found" status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum DeleteResult {
    Deleted(DeleteResponse),
    NotFound(StatusResponse),
}

/// Success message shared by both update endpoints.
pub const UPDATE_OK: &str = "Update successfully";
