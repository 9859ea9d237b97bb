//! CLI administration tool for snaplink.
//!
//! Creates links, shows statistics and runs database maintenance without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- create --url https://example.com
//!
//! # Click total for one link
//! cargo run --bin admin -- stats --code aZ3kP9
//!
//! # Totals for the whole database
//! cargo run --bin admin -- stats
//!
//! # Apply migrations
//! cargo run --bin admin -- migrate
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `BASE_URL` (optional): prefix for printed short URLs
//! - `SHORT_CODE_LENGTH`, `SHORT_CODE_MAX_ATTEMPTS` (optional)
//!
//! Settings are loaded and validated the same way as for the server.

use snaplink::application::services::{LinkService, StatsService};
use snaplink::config::{Config, load_from_env, mask_connection_string};
use snaplink::error::AppError;
use snaplink::infrastructure::persistence::{PgClickRepository, PgLinkRepository, run_migrations};
use snaplink::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Create {
        /// URL to shorten (http or https)
        #[arg(short, long)]
        url: String,
    },

    /// Show statistics for one link, or totals when no code is given
    Stats {
        /// Short code to look up
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Apply pending database migrations
    Migrate,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_from_env().context("Invalid configuration")?;
    let database_url = config
        .database_url
        .as_deref()
        .context("Database is not configured")?;

    let pool = connect_pool(&config)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(database_url)))?;

    match cli.command {
        Commands::Create { url } => create_link(&pool, &config, url).await?,
        Commands::Stats { code: Some(code) } => link_stats(&pool, &code).await?,
        Commands::Stats { code: None } => handle_stats(&pool).await?,
        Commands::Migrate => migrate(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Creates a link and prints its code and full short URL.
async fn create_link(pool: &PgPool, config: &Config, url: String) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let service = LinkService::with_code_policy(
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))),
        config.short_code_length,
        config.code_max_attempts,
    );

    let link = service
        .create_link(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("  Code:      {}", link.short_code.bright_yellow().bold());
    println!("  Long URL:  {}", link.long_url.cyan());
    println!(
        "  Short URL: {}",
        service
            .get_short_url(&config.base_url, &link.short_code)
            .bright_green()
            .bold()
    );
    println!();

    Ok(())
}

/// Prints the click total for one short code.
async fn link_stats(pool: &PgPool, code: &str) -> Result<()> {
    println!("{}", "📊 Link Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());
    let service = StatsService::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool)),
    );

    match service.get_link_stats(code).await {
        Ok(stats) => {
            println!("  Code:     {}", stats.link.short_code.bright_yellow().bold());
            println!("  Long URL: {}", stats.link.long_url.cyan());
            println!(
                "  Created:  {}",
                stats
                    .link
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
            println!(
                "  Clicks:   {}",
                stats.total_clicks.to_string().bright_green().bold()
            );
        }
        Err(AppError::NotFound { .. }) => {
            println!("  {} {}", "No link found for code".yellow(), code.bright_white());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to load statistics: {}", e)),
    }
    println!();

    Ok(())
}

/// Displays database totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn migrate(pool: &PgPool) -> Result<()> {
    println!("{}", "🛠  Applying migrations...".bright_blue());

    run_migrations(pool)
        .await
        .context("Failed to run migrations")?;

    println!("{}", "✅ Migrations applied".green().bold());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
