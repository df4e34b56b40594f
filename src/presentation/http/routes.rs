//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        // Runs after routing so the matched path is available as a label
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        // Library browsing
        .route("/libraries", get(handlers::library::list_libraries))
        .route(
            "/libraries/{library_uid}/books",
            get(handlers::library::list_library_books),
        )
        // Reservations (caller identified by X-User-Name)
        .route(
            "/reservations",
            get(handlers::reservation::get_reservations).post(handlers::reservation::take_book),
        )
        .route(
            "/reservations/{reservation_uid}/return",
            post(handlers::reservation::return_book),
        )
        .route("/rating", get(handlers::rating::get_rating))
}
