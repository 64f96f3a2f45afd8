//! Table query execution
//!
//! Runs a parsed query over one dataset:
//!
//! 1. Resolve request columns to accessors
//! 2. Filter (global search, then column regex search)
//! 3. Sort by the single sort column
//! 4. Cut the requested page
//!
//! Any failure aborts the query before a result is built.

use tracing::debug;

use crate::dataset::Dataset;
use crate::query::{TableQuery, TableResult};

use super::distinct::DistinctValues;
use super::filters::RowFilter;
use super::paginate::Paginator;
use super::resolver::ColumnResolver;
use super::result::QueryResult;
use super::sorter::RowSorter;

/// Executes table queries against a read-only dataset
#[derive(Debug, Clone, Copy)]
pub struct TableExecutor<'d> {
    dataset: &'d Dataset,
}

impl<'d> TableExecutor<'d> {
    pub fn new(dataset: &'d Dataset) -> Self {
        Self { dataset }
    }

    /// Execute a query, returning the requested page
    pub fn execute(&self, query: &TableQuery) -> TableResult<QueryResult> {
        let resolved = ColumnResolver::resolve(self.dataset, query)?;
        let filter = RowFilter::new(&query.global_search, &resolved.columns)?;

        let mut rows = filter.apply(self.dataset.rows());
        debug!(
            scanned = self.dataset.len(),
            matched = rows.len(),
            "table query filtered"
        );

        RowSorter::sort(&mut rows, &resolved.sort.accessor, resolved.sort.direction);

        let page = Paginator::paginate(rows, query.page);
        debug!(
            start = query.page.start,
            length = query.page.length,
            returned = page.rows.len(),
            "table query paginated"
        );

        Ok(QueryResult::from_page(query.draw_token.clone(), page))
    }

    /// Distinct values for a comma-separated column list
    pub fn distinct(&self, columns: Option<&str>) -> DistinctValues {
        DistinctValues::compute(self.dataset, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Row;
    use crate::query::{ColumnDescriptor, SortSpec, TableError};

    fn dataset() -> Dataset {
        Dataset::positional(vec![
            vec!["1", "x", "B"],
            vec!["2", "y", "A"],
            vec!["3", "z", "C"],
        ])
        .unwrap()
    }

    fn columns() -> Vec<ColumnDescriptor> {
        (0..3).map(|i| ColumnDescriptor::new(i, i.to_string())).collect()
    }

    #[test]
    fn test_sort_desc_scenario() {
        let dataset = dataset();
        let query = TableQuery::new(columns()).with_sort(SortSpec::desc(2));

        let result = TableExecutor::new(&dataset).execute(&query).unwrap();
        assert_eq!(
            result.rows,
            vec![
                Row::positional(["3", "z", "C"]),
                Row::positional(["1", "x", "B"]),
                Row::positional(["2", "y", "A"]),
            ]
        );
        assert_eq!(result.records_total, 3);
    }

    #[test]
    fn test_draw_token_echoed() {
        let dataset = dataset();
        let query = TableQuery::new(columns()).with_draw("42");

        let result = TableExecutor::new(&dataset).execute(&query).unwrap();
        assert_eq!(result.draw_token.as_deref(), Some("42"));
    }

    #[test]
    fn test_filtered_counts() {
        let dataset = dataset();
        let query = TableQuery::new(columns()).with_global_search("y");

        let result = TableExecutor::new(&dataset).execute(&query).unwrap();
        assert_eq!(result.records_total, 1);
        assert_eq!(result.records_filtered, 1);
    }

    #[test]
    fn test_error_short_circuits() {
        let dataset = dataset();
        let mut columns = columns();
        columns[0] = columns[0].clone().with_regex("[");
        let query = TableQuery::new(columns);

        let err = TableExecutor::new(&dataset).execute(&query).unwrap_err();
        assert!(matches!(err, TableError::InvalidPattern { .. }));
    }

    #[test]
    fn test_dataset_not_mutated() {
        let dataset = dataset();
        let before = dataset.clone();
        let query = TableQuery::new(columns()).with_sort(SortSpec::desc(2));

        TableExecutor::new(&dataset).execute(&query).unwrap();
        assert_eq!(dataset, before);
    }
}
