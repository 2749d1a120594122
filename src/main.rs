use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ghostdrop::{
    app,
    services::{file_storage::UploadStore, lifecycle::ServerLifecycle},
    utils::config::AppConfig,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ghostdrop=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GhostDrop one-shot upload server");

    let config = AppConfig::from_env();
    tracing::info!("Configuration loaded: {:?}", config);

    let store = UploadStore::new(&config.upload_dir)
        .context("failed to prepare the upload directory")?;
    tracing::info!("Upload directory is set to: {}", store.root().display());

    let config = Arc::new(config);
    let lifecycle = ServerLifecycle::new(config.clone());

    let state = AppState {
        config,
        store: Arc::new(store),
        shutdown: lifecycle.shutdown_handle(),
    };

    // Blocks until one upload has been handled and the server drained.
    lifecycle.start(app(state)).await?;

    Ok(())
}
