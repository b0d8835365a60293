//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Lifecycle endpoints are mounted under `/api`. The health check is
//! served at `/api/health` and, for load balancers, at `/health`.

pub mod dto;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api", handlers::routes().merge(handlers::system::routes()))
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}

/// Builds the servable application: routes, middleware, and state.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    with_middleware(build_router().with_state(state), request_timeout)
}

/// Wraps a router in the HTTP middleware stack: request timeout (408),
/// request tracing, and permissive CORS.
pub fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
