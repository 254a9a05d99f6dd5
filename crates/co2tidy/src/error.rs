//! Error types for the co2tidy library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for co2tidy operations.
///
/// Only fatal preconditions surface here. Malformed cells are modelled as
/// `None` by the coercion functions and never become errors.
#[derive(Debug, Error)]
pub enum TidyError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// None of the candidate encodings could decode and parse the file.
    #[error("Could not read '{path}' with any of the encodings {tried:?}: {last_error}")]
    Encoding {
        path: PathBuf,
        tried: Vec<&'static str>,
        last_error: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A column the caller asked for is not in the table.
    #[error("Column '{column}' not found in {file}")]
    MissingColumn { column: String, file: String },

    /// The region mapping file required by apply mode is absent.
    #[error("Mapping file not found: {0}")]
    MappingNotFound(PathBuf),

    /// Error saving or loading persisted artifacts.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for co2tidy operations.
pub type Result<T> = std::result::Result<T, TidyError>;
