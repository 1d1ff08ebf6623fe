// Counter HTTP routes

use crate::services::CounterService;
use crate::storage::StorageBackend;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use eventboard_core::Counter;
use std::sync::Arc;

use super::common::{internal_error, ApiError, ErrorResponse};

/// App state for stats routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CounterService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(CounterService::new(db)),
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/stats", get(get_stats))
        .route("/api/v1/stats/reconcile", post(reconcile_stats))
        .with_state(state)
}

/// GET /api/v1/stats - Current counter values
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Counter values", body = Counter),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "stats"
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Counter>, ApiError> {
    let counter = state
        .service
        .get()
        .await
        .map_err(|e| internal_error("read counter", e))?;

    Ok(Json(counter))
}

/// POST /api/v1/stats/reconcile - Recount live totals from stored entities
#[utoipa::path(
    post,
    path = "/api/v1/stats/reconcile",
    responses(
        (status = 200, description = "Counter after recount", body = Counter),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "stats"
)]
pub async fn reconcile_stats(State(state): State<AppState>) -> Result<Json<Counter>, ApiError> {
    let counter = state
        .service
        .reconcile()
        .await
        .map_err(|e| internal_error("reconcile counter", e))?;

    Ok(Json(counter))
}
