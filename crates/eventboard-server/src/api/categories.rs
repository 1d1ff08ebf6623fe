// Category HTTP routes (JSON)

use crate::services::CategoryService;
use crate::storage::StorageBackend;
use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Json, Router,
};
use eventboard_core::{CategoryWithEvents, NewCategory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::common::{
    internal_error, ApiError, DeleteResponse, DeleteResult, ErrorResponse, StatusResponse,
    UPDATE_OK,
};

/// Request to create a category
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// Alphanumeric display name. Its first two characters seed the ID.
    #[schema(example = "Music")]
    pub name: Option<String>,
    #[schema(example = "Concerts and live sets")]
    pub description: Option<String>,
    /// Image path or URL.
    pub image: Option<String>,
}

/// Response to a successful create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryResponse {
    #[serde(rename = "categoryID")]
    #[schema(example = "CMU-0042")]
    pub category_id: String,
}

/// Request to delete a category
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteCategoryRequest {
    #[serde(rename = "categoryID")]
    #[schema(example = "CMU-0042")]
    pub category_id: Option<String>,
}

/// Request to update a category. Only name and description can change.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    #[serde(rename = "categoryID")]
    #[schema(example = "CMU-0042")]
    pub category_id: Option<String>,
    #[schema(example = "Jazz")]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// App state for category routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CategoryService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(CategoryService::new(db)),
        }
    }
}

/// Create category routes, relative to `/api/v1/category/{code}`
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/add", post(create_category))
        .route("/list", get(list_categories))
        .route("/delete", delete(delete_category))
        .route("/update", put(update_category))
        .with_state(state)
}

/// POST /api/v1/category/{code}/add - Create a category
#[utoipa::path(
    post,
    path = "/api/v1/category/{code}/add",
    params(("code" = String, Path, description = "Route code")),
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created", body = CreateCategoryResponse),
        (status = 500, description = "Validation or storage error", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<CreateCategoryResponse>, ApiError> {
    let input = NewCategory::new(req.name, req.description, req.image)
        .map_err(|e| internal_error("create category", e.into()))?;

    let category = state
        .service
        .create(input)
        .await
        .map_err(|e| internal_error("create category", e))?;

    Ok(Json(CreateCategoryResponse {
        category_id: category.category_id,
    }))
}

/// GET /api/v1/category/{code}/list - List categories with their events
#[utoipa::path(
    get,
    path = "/api/v1/category/{code}/list",
    params(("code" = String, Path, description = "Route code")),
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryWithEvents>),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithEvents>>, ApiError> {
    let categories = state
        .service
        .list()
        .await
        .map_err(|e| internal_error("list categories", e))?;

    Ok(Json(categories))
}

/// DELETE /api/v1/category/{code}/delete - Delete a category
#[utoipa::path(
    delete,
    path = "/api/v1/category/{code}/delete",
    params(("code" = String, Path, description = "Route code")),
    request_body = DeleteCategoryRequest,
    responses(
        (status = 200, description = "Deleted, or a not-found status", body = DeleteResult),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Json(req): Json<DeleteCategoryRequest>,
) -> Result<Json<DeleteResult>, ApiError> {
    let category_id = req.category_id.unwrap_or_default();
    let deleted = state
        .service
        .delete(&category_id)
        .await
        .map_err(|e| internal_error("delete category", e))?;

    Ok(Json(match deleted {
        Some(_) => DeleteResult::Deleted(DeleteResponse::one()),
        None => DeleteResult::NotFound(StatusResponse::new("category not found")),
    }))
}

/// PUT /api/v1/category/{code}/update - Update name and description
#[utoipa::path(
    put,
    path = "/api/v1/category/{code}/update",
    params(("code" = String, Path, description = "Route code")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated, or a not-found status", body = StatusResponse),
        (status = 500, description = "Validation or storage error", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let category_id = req.category_id.unwrap_or_default();
    let updated = state
        .service
        .update(&category_id, req.name, req.description)
        .await
        .map_err(|e| internal_error("update category", e))?;

    Ok(Json(match updated {
        Some(_) => StatusResponse::new(UPDATE_OK),
        None => StatusResponse::new("Category not found"),
    }))
}
