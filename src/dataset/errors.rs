//! # Dataset Errors
//!
//! Error types raised while loading or assembling a dataset.

use thiserror::Error;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Dataset errors
///
/// All of these surface at startup, before any request is served.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Dataset file could not be read
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Dataset file is not valid JSON
    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level document has no `data` array
    #[error("Dataset document must contain a \"data\" array")]
    MissingData,

    /// A row does not match the dataset shape
    #[error("Row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

impl DatasetError {
    pub fn invalid_row(row: usize, reason: impl Into<String>) -> Self {
        DatasetError::InvalidRow {
            row,
            reason: reason.into(),
        }
    }
}
