//! Bot entry point: logging, settings, database, then the Discord client.

use cougarcs_bot::{bot, config, errors::Result};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing as early as possible
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load .env; non-fatal, env vars can be set externally
    dotenv().ok();

    let settings = config::settings::load_default_settings()
        .inspect(|_| info!("Application settings loaded."))
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    let settings = Arc::new(settings);

    let db = config::database::create_connection(&settings.effective_database_url())
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;

    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema ready."))
        .inspect_err(|e| error!("Failed to create database schema: {}", e))?;

    // DISCORD_BOT_TOKEN is read directly before use, never stored in settings
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))?;

    bot::run_bot(token, Arc::clone(&settings), db).await?;

    Ok(())
}
