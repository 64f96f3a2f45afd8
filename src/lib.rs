//! tablequery - server-side search, sort and paging for table clients
//!
//! Given an in-memory dataset and the bracket-named query parameters sent by
//! a table widget, returns one filtered, sorted page plus the counts needed
//! for paging, and distinct column values for filter drop-downs.

pub mod cli;
pub mod dataset;
pub mod executor;
pub mod http_server;
pub mod query;

pub use dataset::{Dataset, KeyedRow, Row, RowShape};
pub use executor::{DistinctValues, QueryResult, TableExecutor};
pub use query::{TableError, TableQuery, TableResult};
