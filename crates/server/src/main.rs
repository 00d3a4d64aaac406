//! Server entry point: load data and model, then serve the API.

use anyhow::{Context, Result};
use catalog::RatingsStore;
use predictor::SvdModel;
use server::omdb::OmdbClient;
use server::{AppState, ServerConfig, router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server=debug,recommender=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env().context("Failed to read server configuration")?;
    info!(
        data_dir = %config.data_dir.display(),
        model_path = %config.model_path.display(),
        "Starting RecordMender server"
    );

    // Both loads are fatal on failure: without data or model we must not
    // serve requests.
    let store = Arc::new(
        RatingsStore::load_from_files(&config.data_dir)
            .context("Failed to load ratings store")?,
    );
    let (movies, users, ratings) = store.counts();
    info!(movies, users, ratings, "Ratings store ready");

    let model = Arc::new(
        SvdModel::load(&config.model_path).context("Failed to load rating prediction model")?,
    );

    let omdb = OmdbClient::new(config.omdb_base_url.clone(), config.omdb_api_key.clone());
    let state = AppState::new(store, model, omdb);
    let app = router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
