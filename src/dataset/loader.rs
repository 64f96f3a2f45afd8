//! Dataset loading
//!
//! Datasets are JSON documents of the form `{"data": [row, ...]}`.
//! Positional rows are arrays of strings, keyed rows are objects whose
//! values are strings. Field order of keyed rows follows the file.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::errors::{DatasetError, DatasetResult};
use super::row::{Dataset, KeyedRow, Row, RowShape};

/// Loads datasets from JSON sources
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load a dataset file
    pub fn from_path(path: &Path, shape: RowShape) -> DatasetResult<Dataset> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let dataset = Self::from_json_str(&content, shape)?;

        tracing::info!(
            path = %path.display(),
            shape = shape.as_str(),
            rows = dataset.len(),
            "dataset loaded"
        );

        Ok(dataset)
    }

    /// Parse a dataset document
    pub fn from_json_str(content: &str, shape: RowShape) -> DatasetResult<Dataset> {
        let document: Value = serde_json::from_str(content)?;
        Self::from_value(document, shape)
    }

    /// Convert an already parsed document
    pub fn from_value(document: Value, shape: RowShape) -> DatasetResult<Dataset> {
        let rows = match document {
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(rows)) => rows,
                _ => return Err(DatasetError::MissingData),
            },
            _ => return Err(DatasetError::MissingData),
        };

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| Self::convert_row(i, row, shape))
            .collect::<DatasetResult<Vec<_>>>()?;

        Dataset::new(shape, rows)
    }

    fn convert_row(index: usize, row: Value, shape: RowShape) -> DatasetResult<Row> {
        match (shape, row) {
            (RowShape::Positional, Value::Array(values)) => {
                let values = values
                    .into_iter()
                    .enumerate()
                    .map(|(col, v)| Self::expect_string(index, &col.to_string(), v))
                    .collect::<DatasetResult<Vec<_>>>()?;
                Ok(Row::Positional(values))
            }
            (RowShape::Keyed, Value::Object(fields)) => {
                let mut row = KeyedRow::new();
                for (name, v) in fields {
                    let value = Self::expect_string(index, &name, v)?;
                    row.insert(name, value);
                }
                Ok(Row::Keyed(row))
            }
            (RowShape::Positional, _) => Err(DatasetError::invalid_row(index, "expected an array")),
            (RowShape::Keyed, _) => Err(DatasetError::invalid_row(index, "expected an object")),
        }
    }

    fn expect_string(row: usize, column: &str, value: Value) -> DatasetResult<String> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(DatasetError::invalid_row(
                row,
                format!("field {} must be a string, found {}", column, other),
            )),
        }
    }
}
