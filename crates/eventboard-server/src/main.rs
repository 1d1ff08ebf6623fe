// Eventboard server
// Decision: PostgreSQL when DATABASE_URL is set, in-memory otherwise (dev mode)
// Decision: Migrations and the counter row are prepared before serving

use anyhow::{Context, Result};
use eventboard_server::{build_app, ServerConfig, StorageBackend};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventboard_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "eventboard starting...");

    let config = ServerConfig::from_env();

    let db = match config.database_url.as_deref() {
        Some(url) => {
            let db = StorageBackend::postgres(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set or DEV_MODE enabled: using in-memory storage");
            StorageBackend::in_memory()
        }
    };

    db.prepare().await.context("Failed to prepare database")?;

    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }
    tracing::info!(route_code = %config.route_code, "Routes configured");

    let app = build_app(Arc::new(db), &config).context("Failed to build router")?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
