//! Summary Reporter - label distributions and importance rankings
//!
//! Produces serializable chart specs; the bundled dashboard page does
//! the actual drawing. No statistics beyond frequency counting and
//! sorting happen here.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::{ClassLabel, Classifier};

/// Full response for one analyzed upload
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub rows: usize,
    pub columns: usize,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub models: Vec<ModelReport>,
}

/// Charts and tables for a single classifier
#[derive(Debug, Serialize)]
pub struct ModelReport {
    pub model: String,
    /// Name of the derived label column ("random_forest_label")
    pub label_column: String,
    pub distribution: Vec<DistributionEntry>,
    pub importances: Vec<ImportanceEntry>,
    pub prediction_chart: BarChart,
    pub importance_chart: BarChart,
}

/// One label's share of the predictions
#[derive(Debug, Clone, Serialize)]
pub struct DistributionEntry {
    pub label: String,
    pub count: usize,
    /// Percent of rows, 0-100, fraction rounded to 5 decimal places
    pub percent: f64,
}

/// One feature's importance score
#[derive(Debug, Clone, Serialize)]
pub struct ImportanceEntry {
    pub feature: String,
    pub importance: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Declarative bar chart for the dashboard page
#[derive(Debug, Clone, Serialize)]
pub struct BarChart {
    pub title: String,
    pub orientation: Orientation,
    pub value_label: String,
    /// Fixed axis ceiling; None lets the renderer scale to the data
    pub value_max: Option<f64>,
    pub bars: Vec<Bar>,
}

/// Build the full per-model report from its predicted labels.
pub fn model_report(model: &dyn Classifier, labels: &[ClassLabel]) -> ModelReport {
    let distribution = label_distribution(labels);
    let importances = importance_ranking(model);

    let prediction_chart = BarChart {
        title: format!("{} Predictions (%)", display_name(model.name())),
        orientation: Orientation::Vertical,
        value_label: "Percentage".to_string(),
        value_max: Some(100.0),
        bars: distribution
            .iter()
            .map(|entry| Bar {
                label: entry.label.clone(),
                value: entry.percent,
            })
            .collect(),
    };

    let importance_chart = BarChart {
        title: format!("{} Feature Importances", display_name(model.name())),
        orientation: Orientation::Horizontal,
        value_label: "Importance".to_string(),
        value_max: None,
        bars: importances
            .iter()
            .map(|entry| Bar {
                label: entry.feature.clone(),
                value: entry.importance as f64,
            })
            .collect(),
    };

    ModelReport {
        model: model.name().to_string(),
        label_column: format!("{}_label", model.name()),
        distribution,
        importances,
        prediction_chart,
        importance_chart,
    }
}

/// Percentage-normalized frequency table, largest share first.
///
/// The fraction is rounded to 5 decimal places before scaling to
/// 0-100, matching the training-side reports.
pub fn label_distribution(labels: &[ClassLabel]) -> Vec<DistributionEntry> {
    let total = labels.len();
    if total == 0 {
        return Vec::new();
    }

    let mut entries: Vec<DistributionEntry> = [ClassLabel::Benign, ClassLabel::DDoS]
        .iter()
        .filter_map(|label| {
            let count = labels.iter().filter(|l| *l == label).count();
            if count == 0 {
                return None;
            }
            let fraction = (count as f64 / total as f64 * 1e5).round() / 1e5;
            Some(DistributionEntry {
                label: label.to_string(),
                count,
                percent: fraction * 100.0,
            })
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));
    entries
}

/// Feature/importance pairs sorted descending by importance.
pub fn importance_ranking(model: &dyn Classifier) -> Vec<ImportanceEntry> {
    let mut entries: Vec<ImportanceEntry> = model
        .feature_names()
        .iter()
        .zip(model.feature_importances())
        .map(|(feature, &importance)| ImportanceEntry {
            feature: feature.clone(),
            importance,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(Ordering::Equal)
    });
    entries
}

fn display_name(name: &str) -> String {
    match name {
        "random_forest" => "Random Forest".to_string(),
        "gradient_boosting" => "Gradient Boosting".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppResult;
    use ndarray::Array2;

    struct StubModel {
        features: Vec<String>,
        importances: Vec<f32>,
    }

    impl Classifier for StubModel {
        fn name(&self) -> &str {
            "random_forest"
        }

        fn feature_names(&self) -> &[String] {
            &self.features
        }

        fn feature_importances(&self) -> &[f32] {
            &self.importances
        }

        fn predict(&self, _features: &Array2<f32>) -> AppResult<Vec<i64>> {
            unreachable!("reporter never predicts")
        }
    }

    fn labels(benign: usize, ddos: usize) -> Vec<ClassLabel> {
        let mut v = vec![ClassLabel::Benign; benign];
        v.extend(std::iter::repeat(ClassLabel::DDoS).take(ddos));
        v
    }

    #[test]
    fn eighty_twenty_split() {
        let dist = label_distribution(&labels(80, 20));

        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].label, "BENIGN");
        assert_eq!(dist[0].percent, 80.0);
        assert_eq!(dist[1].label, "DDoS");
        assert_eq!(dist[1].percent, 20.0);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        // 3/7 and 4/7 don't divide evenly; rounding must keep the sum
        // within 0.001 of 100
        let dist = label_distribution(&labels(3, 4));
        let sum: f64 = dist.iter().map(|e| e.percent).sum();
        assert!((sum - 100.0).abs() < 0.001, "sum was {}", sum);
    }

    #[test]
    fn fraction_rounds_to_five_decimals() {
        // 1/3 = 0.333333... -> 0.33333 -> 33.333
        let dist = label_distribution(&labels(1, 2));
        let benign = dist.iter().find(|e| e.label == "BENIGN").unwrap();
        assert!((benign.percent - 33.333).abs() < 1e-9);
    }

    #[test]
    fn largest_share_comes_first() {
        let dist = label_distribution(&labels(2, 8));
        assert_eq!(dist[0].label, "DDoS");
        assert_eq!(dist[1].label, "BENIGN");
    }

    #[test]
    fn absent_label_is_omitted() {
        let dist = label_distribution(&labels(5, 0));
        assert_eq!(dist.len(), 1);
        assert_eq!(dist[0].label, "BENIGN");
        assert_eq!(dist[0].percent, 100.0);
    }

    #[test]
    fn empty_labels_empty_distribution() {
        assert!(label_distribution(&[]).is_empty());
    }

    #[test]
    fn importances_sorted_descending() {
        let model = StubModel {
            features: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            importances: vec![0.1, 0.6, 0.05, 0.25],
        };

        let ranking = importance_ranking(&model);
        let values: Vec<f32> = ranking.iter().map(|e| e.importance).collect();
        assert_eq!(values, vec![0.6, 0.25, 0.1, 0.05]);
        assert_eq!(ranking[0].feature, "b");
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn prediction_chart_has_fixed_axis() {
        let model = StubModel {
            features: vec!["a".into()],
            importances: vec![1.0],
        };
        let report = model_report(&model, &labels(80, 20));

        assert_eq!(report.label_column, "random_forest_label");
        assert_eq!(report.prediction_chart.value_max, Some(100.0));
        assert!(matches!(
            report.prediction_chart.orientation,
            Orientation::Vertical
        ));
        assert!(matches!(
            report.importance_chart.orientation,
            Orientation::Horizontal
        ));
        assert_eq!(report.importance_chart.value_max, None);
        assert_eq!(report.prediction_chart.bars[0].value, 80.0);
    }
}
