//! Model manifest - sidecar metadata for an ONNX artifact
//!
//! The ONNX graph itself does not expose the trained feature names or
//! the per-feature importance scores, so every artifact ships with a
//! JSON sidecar (same path, `.json` extension) carrying them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Display name of the model ("random_forest", "gradient_boosting")
    pub name: String,

    /// Ordered feature columns the model was trained on
    pub feature_names: Vec<String>,

    /// Importance score per feature, parallel to `feature_names`
    pub feature_importances: Vec<f32>,
}

impl ModelManifest {
    pub fn parse(model: &str, bytes: &[u8]) -> AppResult<Self> {
        let manifest: ModelManifest =
            serde_json::from_slice(bytes).map_err(|e| AppError::ModelLoad {
                model: model.to_string(),
                reason: format!("invalid manifest: {}", e),
            })?;
        manifest.validate(model)?;
        Ok(manifest)
    }

    pub fn load(model: &str, path: &Path) -> AppResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| AppError::ModelLoad {
            model: model.to_string(),
            reason: format!("manifest {} unreadable: {}", path.display(), e),
        })?;
        Self::parse(model, &bytes)
    }

    fn validate(&self, model: &str) -> AppResult<()> {
        if self.feature_names.is_empty() {
            return Err(AppError::ModelLoad {
                model: model.to_string(),
                reason: "manifest declares no features".to_string(),
            });
        }
        if self.feature_names.len() != self.feature_importances.len() {
            return Err(AppError::ModelLoad {
                model: model.to_string(),
                reason: format!(
                    "manifest has {} features but {} importance scores",
                    self.feature_names.len(),
                    self.feature_importances.len()
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_json() -> &'static str {
        r#"{
            "name": "random_forest",
            "feature_names": ["Flow Duration", "Avg Bwd Segment Size"],
            "feature_importances": [0.3, 0.7]
        }"#
    }

    #[test]
    fn parses_valid_manifest() {
        let m = ModelManifest::parse("random_forest", manifest_json().as_bytes()).unwrap();
        assert_eq!(m.name, "random_forest");
        assert_eq!(m.feature_names.len(), 2);
        assert_eq!(m.feature_importances, vec![0.3, 0.7]);
    }

    #[test]
    fn rejects_importance_length_mismatch() {
        let json = r#"{
            "name": "rf",
            "feature_names": ["a", "b"],
            "feature_importances": [0.5]
        }"#;
        let err = ModelManifest::parse("rf", json.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::ModelLoad { .. }));
    }

    #[test]
    fn rejects_empty_feature_set() {
        let json = r#"{"name": "rf", "feature_names": [], "feature_importances": []}"#;
        let err = ModelManifest::parse("rf", json.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::ModelLoad { .. }));
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = ModelManifest::parse("rf", b"not json").unwrap_err();
        assert!(matches!(err, AppError::ModelLoad { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("random_forest.json");
        std::fs::write(&path, manifest_json()).unwrap();

        let m = ModelManifest::load("random_forest", &path).unwrap();
        assert_eq!(m.feature_names[0], "Flow Duration");
    }

    #[test]
    fn missing_file_is_a_model_load_error() {
        let err = ModelManifest::load("rf", Path::new("/nonexistent/rf.json")).unwrap_err();
        assert!(matches!(err, AppError::ModelLoad { .. }));
    }
}
