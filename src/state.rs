//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, StatsService};
use crate::domain::click_queue::ClickQueue;
use crate::domain::repositories::{ClickRepository, LinkRepository};

/// Link service over whichever storage backend was selected at startup.
pub type DynLinkService = LinkService<dyn LinkRepository>;

/// Stats service over whichever storage backend was selected at startup.
pub type DynStatsService = StatsService<dyn LinkRepository, dyn ClickRepository>;

/// Application state shared across request handlers.
///
/// Cheap to clone: every field is reference-counted or small.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub stats_service: Arc<DynStatsService>,
    pub click_queue: Arc<ClickQueue>,
    /// Public prefix for short URLs, e.g. `https://s.example.com`.
    pub base_url: String,
    /// Read the client IP from proxy headers instead of the peer address.
    pub behind_proxy: bool,
}

impl AppState {
    /// Builds the state from repository handles.
    ///
    /// `code_length` and `max_attempts` configure short code generation.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
        click_queue: Arc<ClickQueue>,
        base_url: impl Into<String>,
        code_length: usize,
        max_attempts: usize,
    ) -> Self {
        let link_service = Arc::new(LinkService::with_code_policy(
            link_repository.clone(),
            code_length,
            max_attempts,
        ));
        let stats_service = Arc::new(StatsService::new(link_repository, click_repository));

        Self {
            link_service,
            stats_service,
            click_queue,
            base_url: base_url.into(),
            behind_proxy: false,
        }
    }

    /// Enables reading client IPs from `X-Forwarded-For` / `X-Real-IP`.
    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }
}
