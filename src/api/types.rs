use serde::Serialize;
use std::sync::Arc;

use crate::pdf::{DrawingAnalyzer, PageScale};

pub const ANALYZE_MESSAGE: &str = "Drawing scale extraction complete.";

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub analyzer: Arc<DrawingAnalyzer>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(analyzer: DrawingAnalyzer, max_upload_bytes: usize) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            max_upload_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub sheet_scales: Vec<PageScale>,
    pub message: &'static str,
}

impl AnalyzeResponse {
    pub fn new(sheet_scales: Vec<PageScale>) -> Self {
        Self {
            sheet_scales,
            message: ANALYZE_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
