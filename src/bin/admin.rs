//! CLI administration tool for link-masker.
//!
//! Operates directly on the PostgreSQL store without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Show one link with its statistics
//! cargo run --bin admin -- links show my-link
//!
//! # Invalidate a link
//! cargo run --bin admin -- links invalidate my-link
//!
//! # View totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use link_masker::application::services::LinkService;
use link_masker::config::{Config, mask_connection_string};
use link_masker::domain::entities::Link;
use link_masker::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

type PgLinkService = LinkService<PgLinkRepository>;

/// CLI tool for managing link-masker.
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
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show totals across all links
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a single link and its statistics
    Show {
        /// Short identifier
        short_id: String,
    },

    /// Mark a link inactive (the record is kept)
    Invalidate {
        /// Short identifier
        short_id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    let service = LinkService::new(Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))));

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, service: &PgLinkService) -> Result<()> {
    match action {
        LinkAction::List => list_links(service).await,
        LinkAction::Show { short_id } => show_link(service, &short_id).await,
        LinkAction::Invalidate { short_id, yes } => {
            invalidate_link(service, &short_id, yes).await
        }
    }
}

/// Lists all links with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Short ID         Clicks   Created            Status    Target
///   ──────────────────────────────────────────────────────────────────
///   my-link          42       2025-01-15 10:30   ACTIVE    https://example.com
///   x8Fq2LmA         0        2025-01-16 14:20   EXPIRED   https://example.org
/// ```
async fn list_links(service: &PgLinkService) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .find_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<16} {:<8} {:<18} {:<9} {}",
        "Short ID".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for link in &links {
        let lock = if link.is_password_protected() { " 🔒" } else { "" };

        println!(
            "  {:<16} {:<8} {:<18} {:<9} {}{}",
            link.short_id.cyan(),
            link.click_count.to_string().bright_white(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status_label(link),
            link.original_url,
            lock
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints one link with its statistics.
async fn show_link(service: &PgLinkService, short_id: &str) -> Result<()> {
    let link = service
        .find_one(short_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "🔗 Link".bright_blue().bold());
    println!();
    println!("  Short ID:  {}", link.short_id.cyan());
    println!("  Target:    {}", link.original_url);
    println!("  Status:    {}", status_label(&link));
    println!(
        "  Password:  {}",
        if link.is_password_protected() {
            "yes".yellow()
        } else {
            "no".bright_black()
        }
    );
    println!(
        "  Expires:   {}",
        link.expires_at
            .map(|e| e.to_rfc3339())
            .unwrap_or_else(|| "never".to_string())
    );
    println!(
        "  Clicks:    {}",
        link.click_count.to_string().bright_green().bold()
    );
    println!("  Created:   {}", link.created_at.to_rfc3339().bright_black());
    println!("  Updated:   {}", link.updated_at.to_rfc3339().bright_black());
    println!();

    Ok(())
}

/// Invalidates a link after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Skips links that are already inactive
async fn invalidate_link(service: &PgLinkService, short_id: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🚫 Invalidate Link".bright_blue().bold());
    println!();

    let link = service
        .find_one(short_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if !link.is_active {
        println!("{}", "⚠️  This link is already inactive".yellow());
        return Ok(());
    }

    println!("  Short ID: {}", link.short_id.cyan());
    println!("  Target:   {}", link.original_url);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Invalidate this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .invalidate(short_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to invalidate link: {}", e))?;

    println!();
    println!("{}", "✅ Link invalidated".green().bold());
    println!();

    Ok(())
}

/// Displays totals across all links.
async fn handle_stats(service: &PgLinkService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links = service
        .find_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load links: {}", e))?;

    let now = Utc::now();
    let active = links
        .iter()
        .filter(|l| l.is_active && !l.is_expired_at(now))
        .count();
    let protected = links.iter().filter(|l| l.is_password_protected()).count();
    let clicks: i64 = links.iter().map(|l| l.click_count).sum();

    println!("  Links:     {}", links.len().to_string().bright_green().bold());
    println!("  Reachable: {}", active.to_string().bright_green().bold());
    println!("  Protected: {}", protected.to_string().bright_green().bold());
    println!("  Clicks:    {}", clicks.to_string().bright_green().bold());
    println!();

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

fn status_label(link: &Link) -> ColoredString {
    if !link.is_active {
        "INACTIVE".red()
    } else if link.is_expired_at(Utc::now()) {
        "EXPIRED".yellow()
    } else {
        "ACTIVE".green()
    }
}
