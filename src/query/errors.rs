//! # Table Query Errors
//!
//! Request-scoped failures of the query pipeline. None of them affect the
//! process; the HTTP layer turns them into client errors.

use thiserror::Error;

/// Result type for query pipeline operations
pub type TableResult<T> = Result<T, TableError>;

/// Table query errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A required integer parameter is missing or not a number
    #[error("Malformed query parameter {field}: {reason}")]
    MalformedQuery { field: String, reason: String },

    /// Sort ordinal not among the request columns, or address absent
    /// from the dataset
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A column search value failed to compile as a regular expression
    #[error("Invalid search pattern for column {column}: {reason}")]
    InvalidPattern { column: String, reason: String },
}

impl TableError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TableError::MalformedQuery {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_column(column: impl Into<String>) -> Self {
        TableError::UnknownColumn(column.into())
    }

    pub fn invalid_pattern(column: impl Into<String>, reason: impl Into<String>) -> Self {
        TableError::InvalidPattern {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            TableError::MalformedQuery { .. } => "malformed_query",
            TableError::UnknownColumn(_) => "unknown_column",
            TableError::InvalidPattern { .. } => "invalid_pattern",
        }
    }
}
