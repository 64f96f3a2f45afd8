//! Table query executor
//!
//! Consumes a parsed [`TableQuery`](crate::query::TableQuery) and produces a
//! deterministic page of results.
//!
//! # Execution Flow (strict order)
//!
//! 1. Resolve request columns against the dataset shape
//! 2. Apply global search
//! 3. Apply column regex search
//! 4. Stable sort by the sort column
//! 5. Slice the page window and count
//!
//! Distinct values are computed straight from the dataset.

mod distinct;
mod executor;
mod filters;
mod paginate;
mod resolver;
mod result;
mod sorter;

pub use distinct::DistinctValues;
pub use executor::TableExecutor;
pub use filters::RowFilter;
pub use paginate::{Page, Paginator};
pub use resolver::{
    ColumnAccessor, ColumnResolver, ResolvedColumn, ResolvedQuery, ResolvedSort,
};
pub use result::QueryResult;
pub use sorter::RowSorter;
