// Event HTTP routes (JSON)

use crate::services::EventService;
use crate::storage::StorageBackend;
use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Json, Router,
};
use eventboard_core::{EventDraft, EventWithCategories};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::common::{
    internal_error, ApiError, DeleteResponse, DeleteResult, ErrorResponse, StatusResponse,
    UPDATE_OK,
};

/// Request to create an event
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[schema(example = "Gig")]
    pub name: Option<String>,
    pub description: Option<String>,
    /// Category IDs. Split on commas when the value contains one,
    /// otherwise taken as a single ID.
    #[schema(example = "CMU-0042,CAR-0007")]
    pub categories: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DDTHH:MM` (UTC).
    #[schema(example = "2024-05-01T18:00:00Z")]
    pub start_date_time: Option<String>,
    #[schema(example = 90)]
    pub duration_in_minutes: Option<i32>,
    pub image: Option<String>,
    /// Between 10 and 2000. Defaults to 1000.
    #[schema(example = 500)]
    pub capacity: Option<i32>,
    /// Stored as given.
    pub tickets_available: Option<i32>,
    /// Accepted and ignored: new events are always active.
    pub is_active: Option<bool>,
}

impl From<CreateEventRequest> for EventDraft {
    fn from(req: CreateEventRequest) -> Self {
        EventDraft {
            name: req.name,
            description: req.description,
            categories: req.categories,
            start_date_time: req.start_date_time,
            duration_in_minutes: req.duration_in_minutes,
            image: req.image,
            capacity: req.capacity,
            tickets_available: req.tickets_available,
        }
    }
}

/// Response to a successful create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    #[schema(example = "ABC-42")]
    pub event_id: String,
}

/// Request to delete an event
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventRequest {
    #[schema(example = "ABC-42")]
    pub event_id: Option<String>,
}

/// Request to update an event. Only name and capacity can change.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[schema(example = "ABC-42")]
    pub event_id: Option<String>,
    pub name: Option<String>,
    /// Left unchanged when omitted.
    pub capacity: Option<i32>,
}

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(EventService::new(db)),
        }
    }
}

/// Create event routes, relative to `/api/v1/event/{code}`
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/add", post(create_event))
        .route("/list", get(list_events))
        .route("/delete", delete(delete_event))
        .route("/update", put(update_event))
        .with_state(state)
}

/// POST /api/v1/event/{code}/add - Create an event
#[utoipa::path(
    post,
    path = "/api/v1/event/{code}/add",
    params(("code" = String, Path, description = "Route code")),
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created", body = CreateEventResponse),
        (status = 500, description = "Validation or storage error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, ApiError> {
    let event = state
        .service
        .create(req.into())
        .await
        .map_err(|e| internal_error("create event", e))?;

    Ok(Json(CreateEventResponse {
        event_id: event.event_id,
    }))
}

/// GET /api/v1/event/{code}/list - List events with their categories
#[utoipa::path(
    get,
    path = "/api/v1/event/{code}/list",
    params(("code" = String, Path, description = "Route code")),
    responses(
        (status = 200, description = "All events", body = Vec<EventWithCategories>),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventWithCategories>>, ApiError> {
    let events = state
        .service
        .list()
        .await
        .map_err(|e| internal_error("list events", e))?;

    Ok(Json(events))
}

/// DELETE /api/v1/event/{code}/delete - Delete an event
#[utoipa::path(
    delete,
    path = "/api/v1/event/{code}/delete",
    params(("code" = String, Path, description = "Route code")),
    request_body = DeleteEventRequest,
    responses(
        (status = 200, description = "Deleted, or a not-found status", body = DeleteResult),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Json(req): Json<DeleteEventRequest>,
) -> Result<Json<DeleteResult>, ApiError> {
    let event_id = req.event_id.unwrap_or_default();
    let deleted = state
        .service
        .delete(&event_id)
        .await
        .map_err(|e| internal_error("delete event", e))?;

    Ok(Json(match deleted {
        Some(_) => DeleteResult::Deleted(DeleteResponse::one()),
        None => DeleteResult::NotFound(StatusResponse::new("Event not found")),
    }))
}

/// PUT /api/v1/event/{code}/update - Update name and capacity
#[utoipa::path(
    put,
    path = "/api/v1/event/{code}/update",
    params(("code" = String, Path, description = "Route code")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Updated, or a not-found status", body = StatusResponse),
        (status = 500, description = "Validation or storage error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let event_id = req.event_id.unwrap_or_default();
    let updated = state
        .service
        .update(&event_id, req.name, req.capacity)
        .await
        .map_err(|e| internal_error("update event", e))?;

    Ok(Json(match updated {
        Some(_) => StatusResponse::new(UPDATE_OK),
        None => StatusResponse::new("Event not found"),
    }))
}
