//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `"healthy"` or `"unhealthy"`.
    pub status: String,
    /// Whether the post store answered a round trip.
    #[serde(rename = "dbConnection")]
    pub db_connection: bool,
    /// Current server time (RFC 3339).
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// `GET /api/health` — Service health status, also served at `/health`.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    summary = "Health check",
    description = "Reports whether the post store is reachable. Always 200; an unreachable store is reported in the body.",
    responses(
        (status = 200, description = "Health report", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let db_connection = state.post_service.store_healthy().await;
    let status = if db_connection { "healthy" } else { "unhealthy" };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            db_connection,
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// System routes. Mounted both under `/api` and at the root.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
