//! Row and dataset types
//!
//! A dataset is a read-only sequence of rows sharing one shape. Rows are
//! either positional (ordered string fields) or keyed (named string fields,
//! kept in load order).

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{DatasetError, DatasetResult};

/// How columns are addressed in a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// Columns addressed by integer index
    Positional,
    /// Columns addressed by field name
    Keyed,
}

impl RowShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowShape::Positional => "positional",
            RowShape::Keyed => "keyed",
        }
    }
}

/// A row of named fields, in the order they were loaded.
///
/// Backed by an insertion-ordered `serde_json::Map` whose values are always
/// JSON strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeyedRow {
    fields: Map<String, Value>,
}

impl KeyedRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field (builder style)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, replacing an existing value in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), Value::String(value.into()));
    }

    /// Value of a field by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in row order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Field values in row order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().filter_map(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single dataset row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Row {
    Positional(Vec<String>),
    Keyed(KeyedRow),
}

impl Row {
    /// Build a positional row from anything string-like
    pub fn positional<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Row::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn shape(&self) -> RowShape {
        match self {
            Row::Positional(_) => RowShape::Positional,
            Row::Keyed(_) => RowShape::Keyed,
        }
    }

    /// All field values in row order
    pub fn values(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Row::Positional(values) => Box::new(values.iter().map(String::as_str)),
            Row::Keyed(row) => Box::new(row.values()),
        }
    }
}

/// An immutable, shape-consistent collection of rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    shape: RowShape,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset, checking every row against the shape of row 0
    pub fn new(shape: RowShape, rows: Vec<Row>) -> DatasetResult<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.shape() != shape {
                return Err(DatasetError::invalid_row(
                    i,
                    format!("expected a {} row", shape.as_str()),
                ));
            }
        }

        if let Some((first, rest)) = rows.split_first() {
            for (i, row) in rest.iter().enumerate() {
                Self::check_same_shape(first, row, i + 1)?;
            }
        }

        Ok(Self { shape, rows })
    }

    /// Positional dataset from nested string sequences
    pub fn positional<R, I, S>(rows: R) -> DatasetResult<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            RowShape::Positional,
            rows.into_iter().map(Row::positional).collect(),
        )
    }

    /// Keyed dataset from keyed rows
    pub fn keyed(rows: impl IntoIterator<Item = KeyedRow>) -> DatasetResult<Self> {
        Self::new(RowShape::Keyed, rows.into_iter().map(Row::Keyed).collect())
    }

    /// An empty dataset of the given shape
    pub fn empty(shape: RowShape) -> Self {
        Self {
            shape,
            rows: Vec::new(),
        }
    }

    fn check_same_shape(first: &Row, row: &Row, index: usize) -> DatasetResult<()> {
        match (first, row) {
            (Row::Positional(a), Row::Positional(b)) if a.len() != b.len() => {
                Err(DatasetError::invalid_row(
                    index,
                    format!("expected {} fields, found {}", a.len(), b.len()),
                ))
            }
            (Row::Keyed(a), Row::Keyed(b)) => {
                if a.len() != b.len() || a.names().any(|name| !b.contains(name)) {
                    Err(DatasetError::invalid_row(
                        index,
                        "field names differ from the first row",
                    ))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    pub fn shape(&self) -> RowShape {
        self.shape
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Representative row used for column validation
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
