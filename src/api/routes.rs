//! API Routes
//!
//! Configures the Axum router with the admin endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_cache_handler, clear_rate_limit_handler, health_handler, remove_cache_entry_handler,
    stats_handler, AppState,
};

/// Creates the admin router.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Per-category cache statistics and tracked rate-limit keys
/// - `DELETE /cache/:category` - Empty one content cache
/// - `DELETE /cache/:category/:key` - Drop one cached entry
/// - `DELETE /rate-limit` - Reset rate-limit history (`?key=` for a single scope key)
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/cache/:category", delete(clear_cache_handler))
        .route("/cache/:category/:key", delete(remove_cache_entry_handler))
        .route("/rate-limit", delete(clear_rate_limit_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
