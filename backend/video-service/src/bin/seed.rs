//! Seed the database with synthetic users, videos and comments.
//!
//! Usage: `seed [COUNT]`

use anyhow::Context;
use db_pool::{create_pool, DbConfig};
use video_service::seed::{self, FIRST_NAMES, USAGE};
use video_service::{db, telemetry, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let count = match seed::parse_count(&args, FIRST_NAMES.len()) {
        Ok(count) => count,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            std::process::exit(1);
        }
    };

    dotenvy::dotenv().ok();
    telemetry::init();

    let config = Config::from_env()
        .map_err(anyhow::Error::msg)
        .context("Failed to load configuration")?;

    let mut db_cfg = DbConfig::from_env("video-service-seed");
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }
    let pool = create_pool(db_cfg)
        .await
        .context("Failed to create database pool")?;

    if config.database.run_migrations {
        db::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let plans = seed::plan(count, &mut rand::thread_rng());
    tracing::info!(users = plans.len(), "Seeding database");

    let users = seed::run(&pool, &plans)
        .await
        .context("Seeding failed")?;

    println!("{}", serde_json::to_string_pretty(&users)?);

    pool.close().await;
    Ok(())
}
