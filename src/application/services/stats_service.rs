//! Click statistics service.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use serde_json::json;

/// A link together with its recorded click total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub link: Link,
    pub total_clicks: i64,
}

/// Service reporting click totals per short link.
///
/// Totals only include clicks the workers have already persisted; events still
/// waiting in the queue are not counted.
pub struct StatsService<L: LinkRepository + ?Sized, C: ClickRepository + ?Sized> {
    link_repository: Arc<L>,
    click_repository: Arc<C>,
}

impl<L: LinkRepository + ?Sized, C: ClickRepository + ?Sized> StatsService<L, C> {
    /// Creates a new statistics service.
    pub fn new(link_repository: Arc<L>, click_repository: Arc<C>) -> Self {
        Self {
            link_repository,
            click_repository,
        }
    }

    /// Retrieves the link and its click total for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_link_stats(&self, short_code: &str) -> Result<LinkStats, AppError> {
        let link = self
            .link_repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "short_code": short_code }))
            })?;

        let total_clicks = self.click_repository.count_by_link_id(link.id).await?;

        Ok(LinkStats { link, total_clicks })
    }
}
