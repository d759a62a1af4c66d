//! ONNX-backed classifier
//!
//! Wraps an `ort` session plus its manifest sidecar. Kept behind the
//! `Classifier` trait so the pipeline can swap in mocks.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::manifest::ModelManifest;
use super::Classifier;
use crate::error::{AppError, AppResult};

#[derive(Debug)]
pub struct OnnxClassifier {
    name: String,
    manifest: ModelManifest,
    // ort sessions need &mut to run
    session: Mutex<Session>,
    loaded_at: chrono::DateTime<chrono::Utc>,
}

impl OnnxClassifier {
    /// Load an ONNX artifact and its manifest sidecar.
    ///
    /// The manifest lives next to the artifact with a `.json`
    /// extension: `models/random_forest.onnx` pairs with
    /// `models/random_forest.json`.
    pub fn load(name: &str, model_path: &str) -> AppResult<Self> {
        tracing::info!("Loading ONNX model '{}' from {}", name, model_path);

        let path = Path::new(model_path);
        if !path.exists() {
            return Err(AppError::ModelLoad {
                model: name.to_string(),
                reason: format!("artifact not found: {}", model_path),
            });
        }

        let manifest = ModelManifest::load(name, &manifest_path(path))?;

        let session = Session::builder()
            .map_err(|e| AppError::ModelLoad {
                model: name.to_string(),
                reason: format!("failed to create session builder: {}", e),
            })?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| AppError::ModelLoad {
                model: name.to_string(),
                reason: format!("failed to set optimization: {}", e),
            })?
            .commit_from_file(model_path)
            .map_err(|e| AppError::ModelLoad {
                model: name.to_string(),
                reason: format!("failed to load artifact: {}", e),
            })?;

        tracing::info!(
            "Model '{}' loaded ({} features)",
            name,
            manifest.feature_names.len()
        );

        Ok(Self {
            name: name.to_string(),
            manifest,
            session: Mutex::new(session),
            loaded_at: chrono::Utc::now(),
        })
    }

    pub fn loaded_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.loaded_at
    }
}

fn manifest_path(model_path: &Path) -> PathBuf {
    model_path.with_extension("json")
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn feature_names(&self) -> &[String] {
        &self.manifest.feature_names
    }

    fn feature_importances(&self) -> &[f32] {
        &self.manifest.feature_importances
    }

    fn predict(&self, features: &Array2<f32>) -> AppResult<Vec<i64>> {
        let n_rows = features.nrows();
        let mut session = self.session.lock();

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| AppError::Inference {
                model: self.name.clone(),
                reason: "no output defined".to_string(),
            })?;

        let input_tensor = Value::from_array(features.clone()).map_err(|e| AppError::Inference {
            model: self.name.clone(),
            reason: format!("tensor error: {}", e),
        })?;

        let outputs =
            session
                .run(ort::inputs![input_tensor])
                .map_err(|e| AppError::Inference {
                    model: self.name.clone(),
                    reason: format!("inference failed: {}", e),
                })?;

        let output = outputs.get(&output_name).ok_or_else(|| AppError::Inference {
            model: self.name.clone(),
            reason: "no output".to_string(),
        })?;

        // Tree ensembles exported via sklearn-onnx emit int64 labels.
        // Fall back to float scores for graphs exported without the
        // label post-processing node.
        if let Ok(tensor) = output.try_extract_tensor::<i64>() {
            return Ok(tensor.1.to_vec());
        }

        let tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| AppError::Inference {
                model: self.name.clone(),
                reason: format!("extract error: {}", e),
            })?;
        let data = tensor.1;

        codes_from_scores(data, n_rows).ok_or_else(|| AppError::Inference {
            model: self.name.clone(),
            reason: format!(
                "output shape {} does not match {} input rows",
                data.len(),
                n_rows
            ),
        })
    }
}

/// Map float model output to class codes.
///
/// One score per row is thresholded at 0.5; two scores per row are
/// treated as per-class probabilities and argmaxed.
fn codes_from_scores(data: &[f32], n_rows: usize) -> Option<Vec<i64>> {
    if n_rows == 0 {
        return Some(Vec::new());
    }

    if data.len() == n_rows {
        Some(
            data.iter()
                .map(|&score| if score >= 0.5 { 1 } else { 0 })
                .collect(),
        )
    } else if data.len() == n_rows * 2 {
        Some(
            data.chunks_exact(2)
                .map(|pair| if pair[1] > pair[0] { 1 } else { 0 })
                .collect(),
        )
    } else {
        None
    }
}
