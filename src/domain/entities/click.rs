//! Click entity representing a single recorded redirect.

use chrono::{DateTime, Utc};

/// A persisted click on a short link.
///
/// Clicks are append-only: created by a click worker, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

impl Click {
    /// Creates a new Click instance.
    pub fn new(
        id: i64,
        link_id: i64,
        user_agent: Option<String>,
        ip_address: Option<String>,
        clicked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            link_id,
            user_agent,
            ip_address,
            clicked_at,
        }
    }
}

/// Input data for recording a click.
///
/// `link_id` must reference an existing link; storage rejects it otherwise.
/// `clicked_at` is the time of the redirect, not the time of the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub link_id: i64,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_creation_with_all_fields() {
        let now = Utc::now();
        let click = Click::new(
            1,
            42,
            Some("Mozilla/5.0".to_string()),
            Some("192.168.1.1".to_string()),
            now,
        );

        assert_eq!(click.id, 1);
        assert_eq!(click.link_id, 42);
        assert_eq!(click.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(click.ip_address.as_deref(), Some("192.168.1.1"));
        assert_eq!(click.clicked_at, now);
    }

    #[test]
    fn test_click_creation_minimal() {
        let click = Click::new(1, 10, None, None, Utc::now());

        assert_eq!(click.link_id, 10);
        assert!(click.user_agent.is_none());
        assert!(click.ip_address.is_none());
    }
}
