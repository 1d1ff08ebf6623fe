// Server configuration
//
// Loaded from environment variables (after dotenvy has read `.env`).

use axum::http::HeaderValue;

/// Route code used in every category and event path.
pub const DEFAULT_ROUTE_CODE: &str = "32418361";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL URL. None selects the in-memory backend.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub route_code: String,
    pub cors_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `DATABASE_URL`: PostgreSQL connection string (optional)
    /// - `DEV_MODE`: `true`/`1` forces the in-memory backend even with `DATABASE_URL` set
    /// - `BIND_ADDR`: listen address (default: 0.0.0.0:8080)
    /// - `ROUTE_CODE`: path segment for category and event routes (default: 32418361)
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated origins (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let dev_mode = get("DEV_MODE")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        let database_url = if dev_mode {
            None
        } else {
            get("DATABASE_URL").filter(|s| !s.is_empty())
        };

        let cors_origins = get("CORS_ALLOWED_ORIGINS")
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        Self {
            database_url,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            route_code: get("ROUTE_CODE").unwrap_or_else(|| DEFAULT_ROUTE_CODE.to_string()),
            cors_origins,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
