//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, migrations, click worker spawning, and the Axum
//! server lifecycle including graceful shutdown.

use crate::config::{Config, StorageBackend};
use crate::domain::click_queue::ClickQueue;
use crate::domain::click_worker::ClickWorkerPool;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::persistence::{
    MemoryStore, PgClickRepository, PgLinkRepository, run_migrations,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Repository handles for the selected backend.
pub struct Storage {
    pub links: Arc<dyn LinkRepository>,
    pub clicks: Arc<dyn ClickRepository>,
}

/// Opens a PostgreSQL pool using the pool settings from `config`.
///
/// # Errors
///
/// Returns an error if no database URL is configured or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Builds the storage backend selected by `STORAGE_BACKEND`.
///
/// For PostgreSQL this connects and applies pending migrations.
pub async fn open_storage(config: &Config) -> Result<Storage> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(config).await?;
            tracing::info!("Connected to database");

            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations applied");

            let pool = Arc::new(pool);
            Ok(Storage {
                links: Arc::new(PgLinkRepository::new(pool.clone())),
                clicks: Arc::new(PgClickRepository::new(pool)),
            })
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            Ok(Storage {
                links: store.clone(),
                clicks: store,
            })
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL with migrations, or in-memory)
/// - Click queue and worker pool
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the server stops accepting requests, then the click queue
/// is closed and workers get `SHUTDOWN_GRACE_SECONDS` to drain it.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = open_storage(&config).await?;

    let click_queue = Arc::new(ClickQueue::new(config.click_queue_capacity));
    let workers = ClickWorkerPool::start(
        click_queue.clone(),
        storage.clicks.clone(),
        config.click_worker_count,
    );

    let state = AppState::new(
        storage.links,
        storage.clicks,
        click_queue,
        config.base_url.clone(),
        config.short_code_length,
        config.code_max_attempts,
    )
    .with_behind_proxy(config.behind_proxy);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(wait_for_shutdown())
    .await?;

    tracing::info!("HTTP server stopped, draining click queue");

    let grace = Duration::from_secs(config.shutdown_grace_seconds);
    if tokio::time::timeout(grace, workers.shutdown()).await.is_err() {
        tracing::warn!(
            grace_seconds = config.shutdown_grace_seconds,
            "Click workers did not finish in time, remaining events are lost"
        );
    }

    Ok(())
}

/// Waits for SIGINT or SIGTERM.
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
