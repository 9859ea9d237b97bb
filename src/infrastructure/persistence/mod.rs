//! Storage backends implementing the domain repository traits.
//!
//! - [`PgLinkRepository`] - Link storage on PostgreSQL
//! - [`PgClickRepository`] - Click storage on PostgreSQL
//! - [`MemoryStore`] - In-process links and clicks, used for local runs and tests
//!
//! [`run_migrations`] applies the embedded `migrations/` directory.

pub mod memory_store;
pub mod pg_click_repository;
pub mod pg_link_repository;

pub use memory_store::MemoryStore;
pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;

use sqlx::PgPool;

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
