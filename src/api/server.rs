use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

use super::handlers::{analyze_drawing_handler, generate_estimate_handler};
use super::types::AppState;
use crate::config::ServerConfig;

pub fn create_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/generate-estimate", post(generate_estimate_handler))
        .route("/analyze-drawing", post(analyze_drawing_handler))
        .layer(body_limit)
        .with_state(state)
}

/// Bind to the configured address and serve until the process is stopped
pub async fn serve(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(
        "Listening on {} (uploads in {})",
        listener.local_addr()?,
        state.analyzer.store().dir().display()
    );

    axum::serve(listener, create_router(state)).await
}
