//! Repository trait for click recording and counting.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for click records.
///
/// Each call is an independent write or read; implementations are responsible
/// for their own concurrency safety since several click workers write at once.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Counts clicks recorded for a link.
    ///
    /// Unknown link ids count as zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError>;
}
