//! Model layer - classifier trait, class labels, ONNX artifacts

pub mod manifest;
pub mod onnx;

pub use manifest::ModelManifest;
pub use onnx::OnnxClassifier;

use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Human-readable class of a flow.
///
/// The code mapping is fixed by the training pipeline and shared by
/// both classifiers: 0 is benign traffic, 1 is DDoS. Any other code
/// is rejected upstream as `UnknownClassCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassLabel {
    #[serde(rename = "BENIGN")]
    Benign,
    #[serde(rename = "DDoS")]
    DDoS,
}

impl ClassLabel {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ClassLabel::Benign),
            1 => Some(ClassLabel::DDoS),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::Benign => "BENIGN",
            ClassLabel::DDoS => "DDoS",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pre-fitted binary flow classifier.
///
/// Implementations carry the ordered feature set they were trained
/// on and a per-feature importance score. `predict` takes a matrix
/// whose columns are exactly `feature_names()` in that order.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Ordered feature columns the model was trained on
    fn feature_names(&self) -> &[String];

    /// Importance score per feature, parallel to `feature_names`
    fn feature_importances(&self) -> &[f32];

    /// One raw class code per input row
    fn predict(&self, features: &Array2<f32>) -> AppResult<Vec<i64>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_mapping_is_fixed() {
        assert_eq!(ClassLabel::from_code(0), Some(ClassLabel::Benign));
        assert_eq!(ClassLabel::from_code(1), Some(ClassLabel::DDoS));
        assert_eq!(ClassLabel::from_code(2), None);
        assert_eq!(ClassLabel::from_code(-1), None);
    }

    #[test]
    fn labels_render_like_the_training_data() {
        assert_eq!(ClassLabel::Benign.to_string(), "BENIGN");
        assert_eq!(ClassLabel::DDoS.to_string(), "DDoS");
    }
}
