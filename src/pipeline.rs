//! Feature alignment and inference
//!
//! One upload is one run: align the table against each classifier's
//! trained feature set, predict, label, report. The classifiers run
//! sequentially and the first failure halts the whole run; no partial
//! results are ever returned.

use ndarray::Array2;

use crate::error::{AppError, AppResult};
use crate::model::{ClassLabel, Classifier};
use crate::report::{self, AnalysisReport, ModelReport};
use crate::table::NumericTable;

/// Numeric table plus the derived label column of every classifier
/// that has run over it.
pub struct LabeledTable<'a> {
    table: &'a NumericTable,
    label_columns: Vec<(String, Vec<ClassLabel>)>,
}

impl<'a> LabeledTable<'a> {
    pub fn new(table: &'a NumericTable) -> Self {
        Self {
            table,
            label_columns: Vec::new(),
        }
    }

    pub fn table(&self) -> &NumericTable {
        self.table
    }

    pub fn append_labels(&mut self, column: String, labels: Vec<ClassLabel>) {
        self.label_columns.push((column, labels));
    }

    pub fn labels(&self, column: &str) -> Option<&[ClassLabel]> {
        self.label_columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, labels)| labels.as_slice())
    }
}

/// Select exactly the model's expected columns, in the model's order.
///
/// Fails with `FeatureMismatch` naming every absent column before any
/// prediction is attempted.
pub fn align_features(
    table: &NumericTable,
    model: &dyn Classifier,
) -> AppResult<Array2<f32>> {
    let expected = model.feature_names();

    let missing: Vec<String> = expected
        .iter()
        .filter(|name| !table.has_column(name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(AppError::FeatureMismatch {
            model: model.name().to_string(),
            missing,
        });
    }

    let columns: Vec<&[f32]> = expected
        .iter()
        .map(|name| table.column(name).expect("presence checked above"))
        .collect();

    let n_rows = table.n_rows();
    let mut data = Vec::with_capacity(n_rows * columns.len());
    for row in 0..n_rows {
        for column in &columns {
            data.push(column[row]);
        }
    }

    Array2::from_shape_vec((n_rows, expected.len()), data)
        .map_err(|e| AppError::Internal(format!("matrix shape error: {}", e)))
}

/// Run one classifier over the table and map its codes to labels.
pub fn run_model(table: &NumericTable, model: &dyn Classifier) -> AppResult<Vec<ClassLabel>> {
    let matrix = align_features(table, model)?;
    let codes = model.predict(&matrix)?;

    codes
        .into_iter()
        .map(|code| {
            ClassLabel::from_code(code).ok_or(AppError::UnknownClassCode {
                model: model.name().to_string(),
                code,
            })
        })
        .collect()
}

/// Full run over one uploaded table: every classifier in order, then
/// the per-model charts.
pub fn run_analysis(
    table: &NumericTable,
    models: &[Box<dyn Classifier>],
) -> AppResult<AnalysisReport> {
    let mut labeled = LabeledTable::new(table);
    let mut reports: Vec<ModelReport> = Vec::with_capacity(models.len());

    for model in models {
        let labels = run_model(table, model.as_ref())?;
        tracing::info!(
            "Model '{}' classified {} rows",
            model.name(),
            labels.len()
        );

        let report = report::model_report(model.as_ref(), &labels);
        labeled.append_labels(report.label_column.clone(), labels);
        reports.push(report);
    }

    Ok(AnalysisReport {
        rows: table.n_rows(),
        columns: table.n_cols(),
        generated_at: chrono::Utc::now(),
        models: reports,
    })
}
