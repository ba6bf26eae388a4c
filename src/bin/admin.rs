//! CLI administration tool for study-plan.
//!
//! Provides commands for inspecting and maintaining the topic database and
//! probing deployed instances without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # List topics
//! cargo run --bin admin -- topics list
//!
//! # Delete a topic without prompting
//! cargo run --bin admin -- topics delete 42 --yes
//!
//! # Probe a running instance
//! cargo run --bin admin -- probe http://localhost:8000/health
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: SQLite database URL (default: `sqlite://studyplan.db`)

use study_plan::application::services::TopicService;
use study_plan::config::Config;
use study_plan::infrastructure::http_client::SafeHttpClient;
use study_plan::infrastructure::persistence::{self, SqliteTopicRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing study-plan.
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
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Manage topics
    Topics {
        #[command(subcommand)]
        action: TopicAction,
    },

    /// GET a URL with timeouts and retries, e.g. a health endpoint
    Probe {
        /// URL to request
        url: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

/// Topic management subcommands.
#[derive(Subcommand)]
enum TopicAction {
    /// List all topics
    List,

    /// Delete a topic
    Delete {
        /// Topic ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Probe { url } = &cli.command {
        return probe(url).await;
    }

    let config = Config::from_env();
    let pool = persistence::connect(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Topics { action } => handle_topic_action(action, pool).await?,
        Commands::Probe { .. } => {}
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  SQLite: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            persistence::migrate(pool)
                .await
                .context("Migration failed")?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}

/// Dispatches topic management commands.
async fn handle_topic_action(action: TopicAction, pool: SqlitePool) -> Result<()> {
    let repository = Arc::new(SqliteTopicRepository::new(Arc::new(pool)));
    let service = TopicService::new(repository);

    match action {
        TopicAction::List => list_topics(&service).await?,
        TopicAction::Delete { id, yes } => delete_topic(&service, id, yes).await?,
    }

    Ok(())
}

/// Lists all topics as a table.
///
/// ```text
/// Topics
///
///   ID  Title                          Deadline    Progress
///   ──────────────────────────────────────────────────────────
///   1   Linear algebra                 2030-06-01  40%
///   2   Rust ownership                 -           100%
/// ```
async fn list_topics(service: &TopicService<SqliteTopicRepository>) -> Result<()> {
    println!("{}", "Topics".bright_blue().bold());
    println!();

    let topics = service
        .list_topics()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list topics: {}", e))?;

    if topics.is_empty() {
        println!("{}", "  No topics found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<11} {}",
        "ID".bright_white().bold(),
        "Title".bright_white().bold(),
        "Deadline".bright_white().bold(),
        "Progress".bright_white().bold()
    );
    println!("  {}", "─".repeat(58).bright_black());

    for topic in &topics {
        let deadline = topic
            .deadline
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let progress = format!("{}%", topic.progress);
        let progress = if topic.is_completed() {
            progress.green()
        } else {
            progress.normal()
        };

        println!(
            "  {:<4} {:<30} {:<11} {}",
            topic.id.to_string().bright_black(),
            topic.title.cyan(),
            deadline.bright_black(),
            progress
        );
    }

    println!();
    println!(
        "  Total: {}",
        topics.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes a topic after confirmation (default: No).
async fn delete_topic(
    service: &TopicService<SqliteTopicRepository>,
    id: i64,
    skip_confirm: bool,
) -> Result<()> {
    let topic = service
        .get_topic(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Topic: {}", topic.title.cyan());
    println!("  ID:    {}", topic.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this topic?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_topic(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete topic: {}", e))?;

    println!("{}", "Topic deleted".green().bold());

    Ok(())
}

/// Requests `url` through [`SafeHttpClient`] and reports the outcome.
async fn probe(url: &str) -> Result<()> {
    println!("{} {}", "Probing".bright_blue(), url.bright_white());

    let client = SafeHttpClient::new()?;
    let response = client.get(url).await?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    println!("{} {}", "OK".green().bold(), status.to_string().bright_white());
    if !body.is_empty() {
        println!("{}", body);
    }

    Ok(())
}
