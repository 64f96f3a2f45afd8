//! Result types for table queries

use serde::Serialize;

use crate::dataset::Row;

use super::paginate::Page;

/// Response of a table query, in wire form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    /// Echoed draw token (`null` when the request had none)
    #[serde(rename = "draw")]
    pub draw_token: Option<String>,
    /// Page slice, rows in dataset shape
    #[serde(rename = "data")]
    pub rows: Vec<Row>,
    #[serde(rename = "recordsTotal")]
    pub records_total: usize,
    #[serde(rename = "recordsFiltered")]
    pub records_filtered: usize,
}

impl QueryResult {
    /// Build the response from a computed page
    pub fn from_page(draw_token: Option<String>, page: Page<'_>) -> Self {
        Self {
            draw_token,
            rows: page.rows.into_iter().cloned().collect(),
            records_total: page.records_total,
            records_filtered: page.records_filtered,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
