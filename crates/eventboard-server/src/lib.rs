// Eventboard Server Library
// Decision: Shared library for binaries (server, export-openapi) and router tests
// Decision: The router is assembled here so tests drive exactly what main serves

// JSON API routes and types (shared for OpenAPI generation)
pub mod api;

// Environment configuration
pub mod config;

// OpenAPI spec generation
pub mod openapi;

// Services layer
pub mod services;

// Storage layer
pub mod storage;

// Server-rendered HTML views
pub mod views;

use anyhow::Result;
use axum::http::{header, Method};
use axum::{
    extract::State,
    response::Redirect,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::ServerConfig;
pub use openapi::ApiDoc;
pub use storage::StorageBackend;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

/// Build the complete application router: JSON API, HTML views, health,
/// Swagger UI, CORS (when configured) and request tracing.
pub fn build_app(db: Arc<StorageBackend>, config: &ServerConfig) -> Result<Router> {
    let code = config.route_code.as_str();

    let categories_state = api::categories::AppState::new(db.clone());
    let events_state = api::events::AppState::new(db.clone());
    let stats_state = api::stats::AppState::new(db.clone());
    let health_state = HealthState {
        storage: if db.is_dev_mode() {
            "in-memory"
        } else {
            "postgres"
        },
    };

    let templates = Arc::new(views::Templates::new()?);
    let view_state = views::ViewState::new(db, templates, code);

    let api_routes = Router::new()
        .nest(
            &format!("/api/v1/category/{code}"),
            api::categories::routes(categories_state),
        )
        .nest(
            &format!("/api/v1/event/{code}"),
            api::events::routes(events_state),
        )
        .merge(api::stats::routes(stats_state));

    let app = Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(api_routes)
        .merge(views::routes(view_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(|| async { Redirect::to("/") });

    // Add CORS layer only if origins are configured
    let app = if !config.cors_origins.is_empty() {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.cors_origins.clone()))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]),
        )
    } else {
        app
    };

    Ok(app.layer(TraceLayer::new_for_http()))
}
