use anyhow::Context;
use tracing_subscriber::EnvFilter;

use orgtrack_api::app::{app, AppState};
use orgtrack_api::config;
use orgtrack_api::database::DatabaseManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, ORGTRACK_API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting orgtrack API in {:?} mode", config.environment);

    if orgtrack_api::is_production!() && config.database.url.is_none() {
        tracing::warn!("Production mode without DATABASE_URL; data will not survive a restart");
    }

    let repo = DatabaseManager::repository(&config.database).await?;
    let state = AppState::new(repo, config)?;
    let app = app(state, config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("orgtrack API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
