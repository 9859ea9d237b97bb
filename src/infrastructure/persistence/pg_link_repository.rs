//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

type LinkRow = (i64, String, String, DateTime<Utc>);

fn into_link((id, short_code, long_url, created_at): LinkRow) -> Link {
    Link::new(id, short_code, long_url, created_at)
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Short code uniqueness is enforced by the `links_short_code_key` constraint;
/// a violation surfaces as [`AppError::Conflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row: LinkRow = sqlx::query_as(
            r#"
            INSERT INTO links (short_code, long_url, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, short_code, long_url, created_at
            "#,
        )
        .bind(&new_link.short_code)
        .bind(&new_link.long_url)
        .bind(new_link.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(into_link(row))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(
            r#"
            SELECT id, short_code, long_url, created_at
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(into_link))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
