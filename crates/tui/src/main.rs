mod app;
mod display;

use anyhow::{Context, Result};
use std::{
    env,
    fs::{self, OpenOptions},
    sync::Mutex,
};

use gamehub_core::{
    config::{self, AppConfig},
    CatalogCache, CatalogLoader, CatalogSource, Route,
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    // optional start path, e.g. `gamehub /play/space-run`
    let initial = env::args()
        .nth(1)
        .map(|path| Route::parse(&path))
        .unwrap_or(Route::Listing);

    let source = CatalogSource::parse(&config.catalog_source);
    let loader = CatalogLoader::new(source, config.request_timeout())
        .context("failed to prepare catalog loader")?;
    info!(source = %loader.source(), route = %initial, "Starting game hub");

    let mut app = app::HubApp::new(config, CatalogCache::global().clone(), loader, initial);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("gamehub.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the terminal UI
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
