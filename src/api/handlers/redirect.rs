//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::click_queue::EnqueueOutcome;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the link by code
/// 2. Offer a click event to the queue without waiting
/// 3. Return 307 Temporary Redirect
///
/// # Click Tracking
///
/// Best-effort: if the queue is full or closed the click is dropped, counted
/// and logged, and the redirect is served anyway.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.get_link_by_code(&code).await?;

    let event = ClickEvent::new(
        link.id,
        link.short_code,
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        Some(client_ip(&headers, addr, state.behind_proxy)),
    );

    match state.click_queue.try_enqueue(event) {
        EnqueueOutcome::Accepted => {
            metrics::counter!("click_events_enqueued_total").increment(1);
            debug!(link_id = link.id, short_code = %code, "Click event queued");
        }
        EnqueueOutcome::Dropped(reason) => {
            metrics::counter!("click_events_dropped_total").increment(1);
            warn!(link_id = link.id, short_code = %code, ?reason, "Click event dropped");
        }
    }

    Ok(Redirect::temporary(&link.long_url))
}
