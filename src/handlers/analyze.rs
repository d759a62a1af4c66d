//! Upload-and-analyze handler

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::pipeline;
use crate::report::AnalysisReport;
use crate::table::NumericTable;
use crate::AppState;

/// Accept a CSV upload and run every loaded classifier over it.
///
/// The first file field of the multipart body is taken as the
/// capture; anything else in the request is ignored.
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<AnalysisReport>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(e.to_string()))?
    {
        if field.file_name().is_none() {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidUpload(e.to_string()))?;

        info!("Received capture: {} ({} bytes)", file_name, data.len());

        let table = NumericTable::from_csv(&data)?;
        info!(
            "Parsed table: {} rows x {} columns",
            table.n_rows(),
            table.n_cols()
        );

        // Inference is CPU-bound; keep it off the async workers.
        let models = state.models.clone();
        let report = tokio::task::spawn_blocking(move || {
            pipeline::run_analysis(&table, &models)
        })
        .await
        .map_err(|e| AppError::Internal(format!("analysis task failed: {}", e)))??;

        return Ok(Json(report));
    }

    Err(AppError::InvalidUpload(
        "no file in upload".to_string(),
    ))
}
