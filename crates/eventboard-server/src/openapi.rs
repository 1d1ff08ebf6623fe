// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Eventboard JSON API.
// It can be used by both the server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use eventboard_core::{Category, CategoryWithEvents, Counter, Event, EventWithCategories};
use utoipa::OpenApi;

/// OpenAPI documentation for the Eventboard API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::categories::create_category,
        api::categories::list_categories,
        api::categories::delete_category,
        api::categories::update_category,
        api::events::create_event,
        api::events::list_events,
        api::events::delete_event,
        api::events::update_event,
        api::stats::get_stats,
        api::stats::reconcile_stats,
    ),
    components(
        schemas(
            Category, CategoryWithEvents, Event, EventWithCategories, Counter,
            api::categories::CreateCategoryRequest, api::categories::CreateCategoryResponse,
            api::categories::DeleteCategoryRequest, api::categories::UpdateCategoryRequest,
            api::events::CreateEventRequest, api::events::CreateEventResponse,
            api::events::DeleteEventRequest, api::events::UpdateEventRequest,
            api::ErrorResponse, api::StatusResponse, api::DeleteResponse, api::DeleteResult,
        )
    ),
    tags(
        (name = "categories", description = "Category management endpoints"),
        (name = "events", description = "Event management endpoints"),
        (name = "stats", description = "Aggregate counter endpoints")
    ),
    info(
        title = "Eventboard API",
        version = "0.2.0",
        description = "API for managing events, categories and their statistics",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> serde_json::Result<String> {
        Self::openapi().to_pretty_json()
    }
}
