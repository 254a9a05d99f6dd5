//! Loaded input tables and their provenance.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cell texts read as missing values, compared case-insensitively.
///
/// Placeholder punctuation such as `-` or `.` is kept as data.
pub const NULL_TOKENS: &[&str] = &["na", "n/a", "#n/a", "#na", "<na>", "nan", "-nan", "null", "none"];

/// Provenance of a loaded input file, reported by `inspect` and `tidy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Base name of the file.
    pub file: String,
    /// Path as given by the caller.
    pub path: PathBuf,
    /// `sha256:<hex>` digest of the raw bytes.
    pub hash: String,
    pub size_bytes: u64,
    /// Delimiter family: csv, tsv, csv-semicolon, psv.
    pub format: String,
    /// Encoding that successfully decoded the file.
    pub encoding: String,
    /// Data rows, header excluded.
    pub row_count: usize,
    pub column_count: usize,
    /// Load time, UTC.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Record provenance; `file` is taken from the path and `loaded_at` is now.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        encoding: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            encoding,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// A decoded table of string cells with trimmed headers.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers, whitespace-trimmed.
    pub headers: Vec<String>,
    /// Cells by row; every row is padded or truncated to the header width.
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from string slices. Handy for tests and
    /// for callers that already hold rows in memory.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            headers.iter().map(|h| h.trim().to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Data rows, header excluded.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Raw cells of one column, top to bottom. Missing cells read as `""`.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map_or("", String::as_str))
    }

    /// Find the index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Raw cell text, or `None` outside the table.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Get a cell value, treating null tokens as absent.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.get(row, col).filter(|v| !Self::is_null_value(v))
    }

    /// Whether a cell is blank or one of [`NULL_TOKENS`] (case-insensitive).
    pub fn is_null_value(value: &str) -> bool {
        let value = value.trim();
        value.is_empty() || NULL_TOKENS.iter().any(|t| value.eq_ignore_ascii_case(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_filters_null_tokens() {
        let table = DataTable::from_rows(&["a", "b"], &[&["x", "NA"], &["", "1"]]);
        assert_eq!(table.cell(0, 0), Some("x"));
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.cell(1, 0), None);
        assert_eq!(table.cell(1, 1), Some("1"));
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn test_placeholder_punctuation_is_data() {
        let table = DataTable::from_rows(&["country", "region"], &[&["-", "."], &["#N/A", "<NA>"]]);
        assert_eq!(table.cell(0, 0), Some("-"));
        assert_eq!(table.cell(0, 1), Some("."));
        assert_eq!(table.cell(1, 0), None);
        assert_eq!(table.cell(1, 1), None);
    }

    #[test]
    fn test_from_rows_trims_headers() {
        let table = DataTable::from_rows(&[" country ", "2020"], &[]);
        assert_eq!(table.headers, vec!["country", "2020"]);
        assert_eq!(table.column_index("country"), Some(0));
    }
}
