//! HTTP API route definitions.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_page, fetch_translations, health, metrics, ready, upsert_translations, AppState,
};
use crate::config::CorsOrigins;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Translation endpoints
        .route("/pages", get(fetch_translations).post(upsert_translations))
        .route("/pages/:page", delete(delete_page))
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer for the configured origins.
pub fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => AllowOrigin::list(list.iter().cloned()),
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
