use anyhow::Context;
use clap::Parser;
use estimator_core::{init_tracing, serve, AppState, DrawingAnalyzer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_tracing(config.verbose);

    tracing::info!("Starting estimator-server");
    tracing::debug!("Config: {:?}", config);

    let store = config.upload_store();
    store
        .ensure_dir()
        .context("Failed to prepare upload directory")?;

    let state = AppState::new(DrawingAnalyzer::new(store), config.max_upload_bytes);
    serve(&config, state).await.context("Server error")?;

    Ok(())
}
