//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Click total for a specific short link.
#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
}
