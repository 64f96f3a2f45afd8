//! Column resolution
//!
//! Binds request columns to row accessors for the dataset's shape. Later
//! stages read values only through [`ColumnAccessor`] and never branch on
//! the dataset shape themselves.

use crate::dataset::{Dataset, Row, RowShape};
use crate::query::{ColumnDescriptor, SortDirection, TableError, TableQuery, TableResult};

/// Reads one column's value from a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnAccessor {
    /// Positional rows: field index
    Index(usize),
    /// Keyed rows: field name
    Field(String),
}

impl ColumnAccessor {
    /// Accessor for a request column.
    ///
    /// Positional datasets address by ordinal; keyed datasets by the
    /// descriptor's `data` name.
    pub fn for_descriptor(shape: RowShape, descriptor: &ColumnDescriptor) -> Self {
        match shape {
            RowShape::Positional => ColumnAccessor::Index(descriptor.ordinal),
            RowShape::Keyed => ColumnAccessor::Field(descriptor.data.clone()),
        }
    }

    /// Accessor from a raw address string, `None` if it cannot be one
    pub fn parse_address(shape: RowShape, raw: &str) -> Option<Self> {
        match shape {
            RowShape::Positional => raw.trim().parse().ok().map(ColumnAccessor::Index),
            RowShape::Keyed if raw.is_empty() => None,
            RowShape::Keyed => Some(ColumnAccessor::Field(raw.to_string())),
        }
    }

    /// Value of this column in `row`
    pub fn value<'r>(&self, row: &'r Row) -> Option<&'r str> {
        match (self, row) {
            (ColumnAccessor::Index(i), Row::Positional(values)) => {
                values.get(*i).map(String::as_str)
            }
            (ColumnAccessor::Field(name), Row::Keyed(fields)) => fields.get(name),
            _ => None,
        }
    }

    /// True if the column exists in `row`
    pub fn exists_in(&self, row: &Row) -> bool {
        self.value(row).is_some()
    }

    /// Address as it appears on the wire
    pub fn address(&self) -> String {
        match self {
            ColumnAccessor::Index(i) => i.to_string(),
            ColumnAccessor::Field(name) => name.clone(),
        }
    }
}

/// A request column bound to its accessor
#[derive(Debug, Clone)]
pub struct ResolvedColumn<'q> {
    pub descriptor: &'q ColumnDescriptor,
    pub accessor: ColumnAccessor,
}

/// Sort column bound to its accessor
#[derive(Debug, Clone)]
pub struct ResolvedSort {
    pub accessor: ColumnAccessor,
    pub direction: SortDirection,
}

/// All accessors a query needs
#[derive(Debug, Clone)]
pub struct ResolvedQuery<'q> {
    pub columns: Vec<ResolvedColumn<'q>>,
    pub sort: ResolvedSort,
}

/// Resolves request columns against a dataset
pub struct ColumnResolver;

impl ColumnResolver {
    /// Resolve every descriptor and the sort column.
    ///
    /// Existence is checked once against the first row. An empty dataset
    /// has nothing to check against and every column resolves.
    pub fn resolve<'q>(
        dataset: &Dataset,
        query: &'q TableQuery,
    ) -> TableResult<ResolvedQuery<'q>> {
        let shape = dataset.shape();
        let representative = dataset.first();

        let mut columns = Vec::with_capacity(query.columns.len());
        for descriptor in &query.columns {
            let accessor = ColumnAccessor::for_descriptor(shape, descriptor);

            if let Some(row) = representative {
                if !accessor.exists_in(row) {
                    return Err(TableError::unknown_column(accessor.address()));
                }
            }

            columns.push(ResolvedColumn {
                descriptor,
                accessor,
            });
        }

        let ordinal = query.sort.column_ordinal;
        let sort_column = query
            .column(ordinal)
            .ok_or_else(|| TableError::unknown_column(format!("sort ordinal {}", ordinal)))?;
        let accessor = ColumnAccessor::for_descriptor(shape, sort_column);

        Ok(ResolvedQuery {
            columns,
            sort: ResolvedSort {
                accessor,
                direction: query.sort.direction,
            },
        })
    }
}
