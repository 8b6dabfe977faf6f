//! HTTP API for the estimator.
//!
//! # Endpoints
//!
//! - `POST /generate-estimate` - Materials and labor hours from a JSON quantity record
//! - `POST /analyze-drawing` - Per-page drawing scales from an uploaded PDF (multipart field `file`)
//!
//! # cURL Examples
//!
//! ```bash
//! curl -H 'Content-Type: application/json' \
//!      -d '{"outletCount": 10, "panelCount": 1}' \
//!      http://localhost:5000/generate-estimate
//!
//! curl -F "file=@plans.pdf" http://localhost:5000/analyze-drawing
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, serve};
pub use types::{AnalyzeResponse, AppState, ErrorResponse, ANALYZE_MESSAGE};
