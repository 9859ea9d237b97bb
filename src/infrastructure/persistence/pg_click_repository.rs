//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click records.
///
/// Inserts referencing a missing link fail on the `clicks.link_id` foreign key
/// and surface as [`AppError::Validation`].
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let (id, link_id, user_agent, ip_address, clicked_at): (
            i64,
            i64,
            Option<String>,
            Option<String>,
            DateTime<Utc>,
        ) = sqlx::query_as(
            r#"
            INSERT INTO clicks (link_id, user_agent, ip_address, clicked_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, user_agent, ip_address, clicked_at
            "#,
        )
        .bind(new_click.link_id)
        .bind(&new_click.user_agent)
        .bind(&new_click.ip_address)
        .bind(new_click.clicked_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Click::new(id, link_id, user_agent, ip_address, clicked_at))
    }

    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE link_id = $1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
