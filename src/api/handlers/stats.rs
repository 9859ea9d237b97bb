//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::LinkStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the total recorded clicks for a short link.
///
/// # Endpoint
///
/// `GET /api/v1/links/{code}/stats`
///
/// Clicks still waiting in the queue are not included yet.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let stats = state.stats_service.get_link_stats(&code).await?;

    Ok(Json(LinkStatsResponse {
        short_code: stats.link.short_code,
        long_url: stats.link.long_url,
        created_at: stats.link.created_at,
        total_clicks: stats.total_clicks,
    }))
}
