use anyhow::Context;
use tracing_subscriber::EnvFilter;

use forum_api::config::config;
use forum_api::database::DatabaseManager;
use forum_api::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, token keys, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("forum_api=debug,tower_http=debug")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    tracing::info!("Starting Forum API in {:?} mode", config.environment);
    config.validate().context("invalid configuration")?;

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    DatabaseManager::migrate(&pool).await?;

    let state = AppState::with_postgres(pool, config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    server::serve(listener, state).await?;
    Ok(())
}
