use std::sync::Arc;

use anyhow::Context;
use cinevibe_discovery::{Discovery, Session};
use cinevibe_metadata::omdb::OmdbSource;
use cinevibe_metadata::{ClientConfig, OmdbClient};
use cinevibe_server::config::Config;
use cinevibe_server::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    info!(db_path = %config.db_path, "connecting to database");
    let pool = cinevibe_db::connect(&config.db_path)
        .await
        .context("failed to connect to database")?;

    cinevibe_db::migrate::run(&pool)
        .await
        .context("failed to run migrations")?;
    info!("migrations complete");

    let favorites = cinevibe_db::repo::preferences::load_favorites(&pool)
        .await
        .context("failed to load favorites")?;
    info!(count = favorites.len(), "favorites loaded");

    if config.omdb_api_key.is_none() {
        warn!("OMDB_API_KEY is not set; movie lookups and the proxy will fail");
    }
    let source = OmdbSource::new(config.omdb_url.clone(), config.omdb_api_key.clone());
    let client = OmdbClient::new(
        Arc::new(source),
        ClientConfig {
            cache: config.cache.clone(),
            ..Default::default()
        },
    );

    let mut app_state = AppState::new(pool, Discovery::new(client), Session::new(favorites));
    app_state.cors_origins = config.cors_origins.clone();

    let app = cinevibe_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
