//! Input Loader - CSV upload into a numeric table
//!
//! Mirrors the leniency of the training tooling: column labels are
//! whitespace-trimmed, and every cell that does not parse as a number
//! becomes NaN (the missing marker) instead of an error.

use crate::error::{AppError, AppResult};

/// Uploaded table with all cells coerced to numeric.
///
/// Column-major storage: `columns[i]` holds every row value for the
/// column named `names[i]`. NaN marks a cell that was missing or
/// non-numeric in the upload.
#[derive(Debug, Clone)]
pub struct NumericTable {
    names: Vec<String>,
    columns: Vec<Vec<f32>>,
    n_rows: usize,
}

impl NumericTable {
    /// Parse CSV bytes into a numeric table.
    ///
    /// No row filtering and no imputation beyond the NaN coercion.
    pub fn from_csv(bytes: &[u8]) -> AppResult<Self> {
        if bytes.is_empty() {
            return Err(AppError::InvalidUpload("uploaded file is empty".to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let names: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::InvalidUpload(format!("unreadable header row: {}", e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if names.is_empty() {
            return Err(AppError::InvalidUpload("no columns in upload".to_string()));
        }

        let mut columns: Vec<Vec<f32>> = vec![Vec::new(); names.len()];
        let mut n_rows = 0usize;

        for record in reader.records() {
            let record =
                record.map_err(|e| AppError::InvalidUpload(format!("malformed row: {}", e)))?;

            for (i, cell) in record.iter().enumerate() {
                if i >= columns.len() {
                    break;
                }
                columns[i].push(cell.parse::<f32>().unwrap_or(f32::NAN));
            }
            // Short rows fill with missing so every column stays rectangular
            for column in columns.iter_mut().skip(record.len()) {
                column.push(f32::NAN);
            }
            n_rows += 1;
        }

        Ok(Self {
            names,
            columns,
            n_rows,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Values for a named column, first match on duplicate labels.
    pub fn column(&self, name: &str) -> Option<&[f32]> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_numeric_csv() {
        let csv = b"a,b\n1,2\n3,4\n";
        let table = NumericTable::from_csv(csv).unwrap();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(table.column("a").unwrap(), &[1.0, 3.0]);
        assert_eq!(table.column("b").unwrap(), &[2.0, 4.0]);
    }

    #[test]
    fn trims_whitespace_from_column_labels() {
        let csv = b" Label , Flow Duration \n1,100\n";
        let table = NumericTable::from_csv(csv).unwrap();

        assert!(table.has_column("Label"));
        assert!(table.has_column("Flow Duration"));
        assert!(!table.has_column(" Label "));
    }

    #[test]
    fn coerces_non_numeric_cells_to_nan() {
        let csv = b"a,b\n1,hello\nInfinity,3\n,4\n";
        let table = NumericTable::from_csv(csv).unwrap();

        let a = table.column("a").unwrap();
        let b = table.column("b").unwrap();

        assert_eq!(a[0], 1.0);
        assert!(a[1].is_infinite());
        assert!(a[2].is_nan());
        assert!(b[0].is_nan());
        assert_eq!(b[1], 3.0);
        assert_eq!(b[2], 4.0);
    }

    #[test]
    fn rejects_empty_upload() {
        let err = NumericTable::from_csv(b"").unwrap_err();
        assert!(matches!(err, AppError::InvalidUpload(_)));
    }

    #[test]
    fn unknown_column_lookup_is_none() {
        let table = NumericTable::from_csv(b"a\n1\n").unwrap();
        assert!(table.column("missing").is_none());
    }
}
