//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::server::handlers;
use crate::server::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Near-Earth objects
        .route("/api/neo", get(handlers::get_neo))

        // API documentation
        .route("/docs", get(handlers::swagger_ui))
        .route("/docs/openapi.json", get(handlers::openapi_json))

        .fallback(handlers::not_found)
        .with_state(state)
}
