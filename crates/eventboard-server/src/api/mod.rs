// HTTP API routes
//
// This module contains the JSON route handlers.
// Each submodule handles a specific resource type with its own AppState.

pub mod categories;
pub mod common;
pub mod events;
pub mod stats;

// Re-export common types
pub use common::{DeleteResponse, DeleteResult, ErrorResponse, StatusResponse};
