//! # Table Query Module
//!
//! Request model of the table protocol: parameter parsing and the errors
//! shared by every pipeline stage.

pub mod errors;
pub mod parser;

pub use errors::{TableError, TableResult};
pub use parser::{
    ColumnDescriptor, PageWindow, QuerySource, SortDirection, SortSpec, TableQuery,
    DEFAULT_LENGTH,
};
