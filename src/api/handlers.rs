use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::Json;

use super::error::ApiError;
use super::types::{AnalyzeResponse, AppState};
use crate::estimate::{generate_estimate, EstimateRequest, EstimateResponse};

const FILE_FIELD: &str = "file";

pub async fn generate_estimate_handler(
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody {
        status: e.status(),
        message: e.body_text(),
    })?;

    let response = generate_estimate(&request);
    tracing::info!("Generated estimate: {} labor hours", response.labor_hours);

    Ok(Json(response))
}

pub async fn analyze_drawing_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    // Anything that isn't a multipart form has no file in it
    let mut multipart = multipart.map_err(|_| ApiError::NoFileUploaded)?;

    let (file_name, bytes) = loop {
        let Some(field) = multipart.next_field().await? else {
            return Err(ApiError::NoFileUploaded);
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A part without a filename is a plain form value, not a file
        let file_name = match field.file_name() {
            None => continue,
            Some("") => return Err(ApiError::NoSelectedFile),
            Some(name) => name.to_string(),
        };

        break (file_name, field.bytes().await?);
    };

    tracing::debug!("Received drawing {:?}: {} bytes", file_name, bytes.len());

    let analyzer = state.analyzer.clone();
    let scales = tokio::task::spawn_blocking(move || analyzer.analyze(&file_name, &bytes)).await??;

    Ok(Json(AnalyzeResponse::new(scales)))
}
