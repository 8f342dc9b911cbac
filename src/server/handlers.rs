//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
    Json,
};
use tracing::debug;
use utoipa::OpenApi;

use crate::data::NeoResponse;
use crate::server::docs::{ApiDoc, SWAGGER_UI_HTML};
use crate::server::dto::{HealthResponse, NeoQuery};
use crate::server::error::{ApiError, ErrorResponse};
use crate::server::state::AppState;
use crate::service::NeoOutcome;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime: state.uptime(),
    })
}

/// GET /api/neo?date=YYYY-MM-DD
///
/// Always answers 200 for a well-formed date; upstream trouble shows up as
/// sample objects rather than an error status.
#[utoipa::path(
    get,
    path = "/api/neo",
    tag = "neo",
    params(NeoQuery),
    responses(
        (status = 200, description = "Near-Earth objects for the date", body = NeoResponse),
        (status = 400, description = "Missing or malformed date", body = ErrorResponse)
    )
)]
pub async fn get_neo(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<NeoQuery>, QueryRejection>,
) -> Result<Json<NeoResponse>> {
    let Query(query) = query?;
    let date = query.validated_date()?;

    let outcome = state.service.query(&date).await;
    if let NeoOutcome::Degraded(_, reason) = &outcome {
        debug!(date = %date, ?reason, "answering with sample data");
    }

    Ok(Json(outcome.into_response()))
}

/// GET /docs
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// GET /docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
