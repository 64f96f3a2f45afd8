//! # Dataset Module
//!
//! In-memory, read-only datasets served by the query endpoints.
//! A dataset is loaded once at startup and shared by reference.

mod errors;
mod loader;
mod row;

pub use errors::{DatasetError, DatasetResult};
pub use loader::DatasetLoader;
pub use row::{Dataset, KeyedRow, Row, RowShape};
