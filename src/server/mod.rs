//! # HTTP surface
//!
//! axum server exposing the near-Earth-object query service to the dashboard.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness and uptime
//! - `GET /api/neo?date=YYYY-MM-DD` - Near-Earth objects for a date
//! - `GET /docs` - Swagger UI
//! - `GET /docs/openapi.json` - OpenAPI document

mod docs;
mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use docs::ApiDoc;
pub use dto::{HealthResponse, NeoQuery};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;

/// API server for the dashboard.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_state(AppState::new(config))
    }

    /// Creates a server around prepared state (custom feeds, test clocks).
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Server listening on http://{}", addr);
        info!("Swagger UI available at http://{}/docs", addr);

        axum::serve(listener, self.router()).await
    }
}
