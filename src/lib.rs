pub mod api;
pub mod config;
pub mod estimate;
pub mod pdf;

// Re-export main types
pub use api::{create_router, serve, ApiError, AppState};
pub use config::ServerConfig;
pub use estimate::{generate_estimate, EstimateRequest, EstimateResponse, MaterialLineItem};
pub use pdf::{DrawingAnalyzer, PageScale, ScaleExtractor, UploadStore};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "estimator_core=debug,info"
    } else {
        "estimator_core=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
