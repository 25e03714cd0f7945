//! Default seed script - inserts ten synthetic users
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin seed
//! ```
//!
//! `SEED_CATEGORIES` and `SEED_POSTS_PER_USER` extend the run with categories
//! and posts; see [`SeedConfig`].

use std::process::ExitCode;

use blog::Database;
use test_data::config::SeedConfig;
use test_data::db::{SeedReport, Seeder};
use tracing_subscriber::EnvFilter;

async fn run() -> anyhow::Result<SeedReport> {
    let config = SeedConfig::from_env()?;

    let db = Database::connect(&config.database_url, config.max_connections).await?;
    tracing::info!("Connected to database");

    // A rejected insert is caught and logged by the seeder itself
    let mut rng = config.rng();
    let report = Seeder::from_config(&db, &config).run(&mut rng).await;
    db.close().await;

    Ok(report)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(report) => {
            // Summary output
            tracing::info!("Seed completed!");
            tracing::info!("  Users: {}", report.users.len());
            tracing::info!("  Categories: {}", report.categories.len());
            tracing::info!("  Posts: {}", report.posts.len());
            if let Some(e) = &report.aborted {
                tracing::warn!("  Stopped early: {e}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Seeding failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
