//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Model artifact or manifest missing/corrupt
    #[error("failed to load model '{model}': {reason}")]
    ModelLoad { model: String, reason: String },

    /// Uploaded table lacks columns the model was trained on
    #[error("feature mismatch for model '{model}': missing columns [{}]", .missing.join(", "))]
    FeatureMismatch { model: String, missing: Vec<String> },

    /// Classifier emitted a class code outside {0, 1}
    #[error("model '{model}' produced unknown class code {code}")]
    UnknownClassCode { model: String, code: i64 },

    /// Upload missing, empty, or not decodable as CSV
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// Inference failed inside the ONNX runtime
    #[error("inference failed for model '{model}': {reason}")]
    Inference { model: String, reason: String },

    // Generic errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            AppError::FeatureMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ModelLoad { .. }
            | AppError::UnknownClassCode { .. }
            | AppError::Inference { .. }
            | AppError::Internal(_) => {
                tracing::error!("request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_mismatch_names_missing_columns() {
        let err = AppError::FeatureMismatch {
            model: "random_forest".to_string(),
            missing: vec!["Flow Duration".to_string(), "Avg Bwd Segment Size".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("random_forest"));
        assert!(msg.contains("Flow Duration"));
        assert!(msg.contains("Avg Bwd Segment Size"));
    }

    #[test]
    fn unknown_class_code_names_the_code() {
        let err = AppError::UnknownClassCode {
            model: "gradient_boosting".to_string(),
            code: 7,
        };
        assert!(err.to_string().contains("7"));
    }
}
