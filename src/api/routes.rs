//! API route configuration.

use crate::api::handlers::{create_link_handler, health_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Versioned API routes, nested under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /links`               - Create a short link
/// - `GET  /links/{code}/stats`  - Click total for a link
/// - `GET  /health`              - Storage and click queue status
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route("/links/{code}/stats", get(stats_handler))
        .route("/health", get(health_handler))
}
