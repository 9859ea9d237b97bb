//! In-process storage backend.
//!
//! Holds links and clicks in memory for local runs (`STORAGE_BACKEND=memory`)
//! and integration tests. Data is lost on restart.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Click, Link, NewClick, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    links_by_code: HashMap<String, Link>,
    codes_by_id: HashMap<i64, String>,
    clicks: Vec<Click>,
    clicks_per_link: HashMap<i64, i64>,
}

/// Link and click store implementing both repository traits.
///
/// The code uniqueness check and the insert happen under one write lock, so
/// concurrent creators racing for the same code get exactly one success and
/// [`AppError::Conflict`] for the rest.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded clicks in insertion order.
    pub async fn clicks(&self) -> Vec<Click> {
        self.tables.read().await.clicks.clone()
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut tables = self.tables.write().await;

        if tables.links_by_code.contains_key(&new_link.short_code) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "short_code": new_link.short_code }),
            ));
        }

        let id = tables.links_by_code.len() as i64 + 1;
        let link = Link::new(
            id,
            new_link.short_code.clone(),
            new_link.long_url,
            new_link.created_at,
        );

        tables.codes_by_id.insert(id, new_link.short_code.clone());
        tables.links_by_code.insert(new_link.short_code, link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.tables.read().await.links_by_code.get(short_code).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.links_by_code.len() as i64)
    }
}

#[async_trait]
impl ClickRepository for MemoryStore {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.codes_by_id.contains_key(&new_click.link_id) {
            return Err(AppError::bad_request(
                "Referenced link does not exist",
                json!({ "link_id": new_click.link_id }),
            ));
        }

        let click = Click::new(
            tables.clicks.len() as i64 + 1,
            new_click.link_id,
            new_click.user_agent,
            new_click.ip_address,
            new_click.clicked_at,
        );

        *tables.clicks_per_link.entry(click.link_id).or_default() += 1;
        tables.clicks.push(click.clone());

        Ok(click)
    }

    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .clicks_per_link
            .get(&link_id)
            .copied()
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    fn new_link(code: &str) -> NewLink {
        NewLink::new(code.to_string(), "https://example.com".to_string())
    }

    fn new_click(link_id: i64) -> NewClick {
        NewClick {
            link_id,
            user_agent: Some("test-agent".to_string()),
            ip_address: Some("127.0.0.1".to_string()),
            clicked_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_link() {
        let store = MemoryStore::new();

        let link = store.create(new_link("abc123")).await.unwrap();
        assert_eq!(link.id, 1);

        let found = store.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(found, link);
        assert!(store.find_by_code("missing").await.unwrap().is_none());
        assert_eq!(LinkRepository::count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_code_is_conflict() {
        let store = MemoryStore::new();
        store.create(new_link("abc123")).await.unwrap();

        let result = store.create(new_link("abc123")).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        assert_eq!(LinkRepository::count(&store).await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_for_same_code_have_one_winner() {
        let store = Arc::new(MemoryStore::new());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create(new_link("same01")).await })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 7);
    }

    #[tokio::test]
    async fn test_record_and_count_clicks() {
        let store = MemoryStore::new();
        let link = store.create(new_link("abc123")).await.unwrap();

        store.record_click(new_click(link.id)).await.unwrap();
        store.record_click(new_click(link.id)).await.unwrap();

        assert_eq!(store.count_by_link_id(link.id).await.unwrap(), 2);
        assert_eq!(store.count_by_link_id(999).await.unwrap(), 0);
        assert_eq!(store.clicks().await.len(), 2);
    }

    #[tokio::test]
    async fn test_click_for_unknown_link_is_rejected() {
        let store = MemoryStore::new();

        let result = store.record_click(new_click(42)).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
        assert!(store.clicks().await.is_empty());
    }
}
