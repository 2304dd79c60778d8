//! Error types for the data-loader crate.
//!
//! Only structural problems are errors here. A single bad row never
//! becomes a `DatasetError`; it is skipped and recorded in the
//! [`LoadReport`](crate::types::LoadReport) instead.

use thiserror::Error;

/// Errors that abort loading the catalog.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// File could not be found or opened
    #[error("Failed to open dataset file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the dataset
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader could not decode the header row
    #[error("Malformed header in {source_name}: {reason}")]
    MalformedHeader { source_name: String, reason: String },

    /// The input has no header row at all
    #[error("Dataset {source_name} is empty (no header row)")]
    EmptyHeader { source_name: String },

    /// A required column is absent from the header
    #[error("Dataset {source_name} is missing required column '{column}'")]
    MissingColumn { source_name: String, column: String },

    /// Two header columns resolve to the same record field
    #[error("Dataset {source_name} maps column '{column}' to field '{field}' more than once")]
    DuplicateColumn {
        source_name: String,
        column: String,
        field: String,
    },

    /// In-memory records failed validation
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DatasetError>;
