//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// `id` is assigned by storage. `short_code` is unique across all links; the
/// storage layer's uniqueness constraint is what guarantees it. Links are
/// immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, short_code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            short_code,
            long_url,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewLink {
    /// Builds a link request stamped with the current time.
    pub fn new(short_code: String, long_url: String) -> Self {
        Self {
            short_code,
            long_url,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.short_code, "abc123");
        assert_eq!(link.long_url, "https://example.com");
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_new_link_is_timestamped() {
        let before = Utc::now();
        let new_link = NewLink::new("xyz789".to_string(), "https://rust-lang.org".to_string());
        let after = Utc::now();

        assert_eq!(new_link.short_code, "xyz789");
        assert_eq!(new_link.long_url, "https://rust-lang.org");
        assert!(new_link.created_at >= before && new_link.created_at <= after);
    }
}
