use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::types::ErrorResponse;
use crate::pdf::AnalyzeError;

/// Every failure an endpoint can report. Rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFileUploaded,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("Invalid JSON body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error("Drawing analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoFileUploaded | ApiError::NoSelectedFile => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::Multipart(e) => e.status(),
            ApiError::Analyze(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NoFileUploaded => "no_file",
            ApiError::NoSelectedFile => "empty_filename",
            ApiError::InvalidBody { .. } => "invalid_body",
            ApiError::Multipart(_) => "multipart",
            ApiError::Analyze(e) => e.kind(),
            ApiError::Task(_) => "task",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "Request failed: {}", self);
        } else {
            tracing::warn!(kind = self.kind(), "Rejected request: {}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
