use axum::extract::{Path, State};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /files/:filename — stream a stored upload back to the caller.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    if filename.contains("..") || filename.contains('/') || filename.is_empty() {
        return Err(AppError::validation(vec![(
            "filename".to_string(),
            "invalid filename".to_string(),
        )]));
    }

    let path = state.config.upload_folder.join(&filename);
    let content = std::fs::read(&path)
        .map_err(|_| AppError::FileNotFound(filename.clone()))?;

    let mime = mime_guess::from_path(&filename)
        .first_raw()
        .unwrap_or("application/octet-stream");

    axum::response::Response::builder()
        .header("Content-Type", mime)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(axum::body::Body::from(content))
        .map_err(|e| AppError::Internal(format!("failed to build response: {}", e)))
}
