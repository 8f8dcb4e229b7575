//! CLI administration tool for snaplink.
//!
//! Manages links directly against the database without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Shorten a URL, optionally with a custom code
//! cargo run --bin admin -- links create https://example.com --code promo
//!
//! # Show one link with its click count
//! cargo run --bin admin -- links show promo
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `snaplink::config`.

use snaplink::application::services::{LinkAllocator, LinkQueryService};
use snaplink::config;
use snaplink::infrastructure::persistence::{self, SqliteLinkRepository};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::SqlitePool;
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
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links in creation order
    List,

    /// Create a short link
    Create {
        /// Destination URL (http or https)
        url: String,

        /// Custom short code (3-10 characters: letters, digits, hyphens)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show a link and its click count
    Show {
        /// Short code
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = persistence::connect(&config).await?;
    persistence::run_migrations(&pool).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool, &config.base_url).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;
    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &SqlitePool, base_url: &str) -> Result<()> {
    let repo = Arc::new(SqliteLinkRepository::new(Arc::new(pool.clone())));

    match action {
        LinkAction::List => list_links(LinkQueryService::new(repo)).await,
        LinkAction::Create { url, code } => {
            create_link(LinkAllocator::new(repo), url, code, base_url).await
        }
        LinkAction::Show { code } => show_link(LinkQueryService::new(repo), code, base_url).await,
    }
}

async fn list_links(queries: LinkQueryService<SqliteLinkRepository>) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = queries
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<6} {:<12} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "-".repeat(70).bright_black());

    for link in &links {
        println!(
            "  {:<6} {:<12} {}",
            link.id.to_string().bright_black(),
            link.short_code.cyan(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());

    Ok(())
}

async fn create_link(
    allocator: LinkAllocator<SqliteLinkRepository>,
    url: String,
    code: Option<String>,
    base_url: &str,
) -> Result<()> {
    let link = allocator
        .create_link(url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "Link created".green().bold());
    println!("  Code:      {}", link.short_code.cyan());
    println!("  Short URL: {}", link.short_url(base_url).bright_yellow());
    println!("  Target:    {}", link.original_url);

    Ok(())
}

async fn show_link(
    queries: LinkQueryService<SqliteLinkRepository>,
    code: String,
    base_url: &str,
) -> Result<()> {
    let link = queries
        .get_link(&code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let kind = if link.is_custom { "custom" } else { "generated" };

    println!("{}", link.short_url(base_url).bright_yellow().bold());
    println!("  Target:  {}", link.original_url);
    println!("  Code:    {} ({})", link.short_code.cyan(), kind);
    println!(
        "  Created: {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Clicks:  {}",
        link.click_count.to_string().bright_white().bold()
    );

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            let sqlite_version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;
            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  SQLite version: {}", sqlite_version.cyan());
            println!("  Links stored:   {}", links.to_string().bright_white());
        }
    }

    Ok(())
}
