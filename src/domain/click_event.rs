//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewClick;

/// An in-memory record of one redirect, waiting to be persisted.
///
/// Built by the redirect handler and pushed into the
/// [`crate::domain::click_queue::ClickQueue`]; a click worker later turns it into
/// a [`NewClick`]. Events are never mutated after creation.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler with request metadata
/// 2. Offered to the queue without blocking (dropped if full)
/// 3. Claimed by exactly one worker in [`crate::domain::click_worker`]
/// 4. Converted to [`NewClick`] and written through the click repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
    pub short_code: String,
    pub timestamp: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = ClickEvent::new(
    ///     42,
    ///     "abc123".to_string(),
    ///     Some("Mozilla/5.0"),
    ///     Some("192.168.1.1".to_string()),
    /// );
    /// ```
    pub fn new(
        link_id: i64,
        short_code: String,
        user_agent: Option<&str>,
        ip_address: Option<String>,
    ) -> Self {
        Self {
            link_id,
            short_code,
            timestamp: Utc::now(),
            user_agent: user_agent.map(|s| s.to_string()),
            ip_address,
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(event: ClickEvent) -> Self {
        NewClick {
            link_id: event.link_id,
            user_agent: event.user_agent,
            ip_address: event.ip_address,
            clicked_at: event.timestamp,
        }
    }
}
