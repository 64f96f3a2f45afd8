//! Row filtering
//!
//! Global search is a case-insensitive literal substring test over the
//! concatenated row. Column search is a case-sensitive regex search, applied
//! only to columns flagged as regex. All active tests must pass.

use regex::Regex;

use crate::dataset::Row;
use crate::query::{TableError, TableResult};

use super::resolver::{ColumnAccessor, ResolvedColumn};

/// Compiled per-column pattern
#[derive(Debug, Clone)]
struct ColumnPattern {
    accessor: ColumnAccessor,
    regex: Regex,
}

/// Compiled filter for one query
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    /// Lowercased global search term
    global: Option<String>,
    patterns: Vec<ColumnPattern>,
}

impl RowFilter {
    /// Compile the filter, failing on the first invalid pattern
    pub fn new(global_search: &str, columns: &[ResolvedColumn<'_>]) -> TableResult<Self> {
        let global = if global_search.is_empty() {
            None
        } else {
            Some(global_search.to_lowercase())
        };

        // Plain-text column searches are accepted but not applied.
        let patterns = columns
            .iter()
            .filter(|c| c.descriptor.has_regex_search())
            .map(|c| -> TableResult<ColumnPattern> {
                let regex = Regex::new(&c.descriptor.search_value).map_err(|e| {
                    TableError::invalid_pattern(c.accessor.address(), e.to_string())
                })?;
                Ok(ColumnPattern {
                    accessor: c.accessor.clone(),
                    regex,
                })
            })
            .collect::<TableResult<Vec<_>>>()?;

        Ok(Self { global, patterns })
    }

    /// True if nothing is filtered out
    pub fn is_noop(&self) -> bool {
        self.global.is_none() && self.patterns.is_empty()
    }

    /// Checks a row against every active test
    pub fn matches(&self, row: &Row) -> bool {
        self.matches_global(row) && self.patterns.iter().all(|p| p.matches(row))
    }

    fn matches_global(&self, row: &Row) -> bool {
        match &self.global {
            Some(term) => row.values().collect::<String>().to_lowercase().contains(term),
            None => true,
        }
    }

    /// Surviving rows, in input order
    pub fn apply<'d>(&self, rows: &'d [Row]) -> Vec<&'d Row> {
        if self.is_noop() {
            return rows.iter().collect();
        }
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

impl ColumnPattern {
    fn matches(&self, row: &Row) -> bool {
        self.accessor
            .value(row)
            .map(|value| self.regex.is_match(value))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ColumnDescriptor;

    fn resolved(descriptors: &[ColumnDescriptor]) -> Vec<ResolvedColumn<'_>> {
        descriptors
            .iter()
            .map(|d| ResolvedColumn {
                descriptor: d,
                accessor: ColumnAccessor::Index(d.ordinal),
            })
            .collect()
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::positional(["Airi Satou", "Tokyo"]),
            Row::positional(["Tiger Nixon", "Edinburgh"]),
            Row::positional(["Ashton Cox", "San Francisco"]),
        ]
    }

    fn names<'a>(rows: &[&'a Row]) -> Vec<&'a str> {
        rows.iter()
            .map(|r| ColumnAccessor::Index(0).value(*r).unwrap())
            .collect()
    }

    #[test]
    fn test_global_search_case_insensitive() {
        let data = rows();
        let filter = RowFilter::new("TIGER", &[]).unwrap();
        assert_eq!(names(&filter.apply(&data)), vec!["Tiger Nixon"]);
    }

    #[test]
    fn test_global_search_spans_fields() {
        let data = rows();
        // "Cox" + "San" concatenate to "CoxSan"
        let filter = RowFilter::new("xsan", &[]).unwrap();
        assert_eq!(names(&filter.apply(&data)), vec!["Ashton Cox"]);
    }

    #[test]
    fn test_global_search_is_literal() {
        let data = rows();
        let filter = RowFilter::new("t.ger", &[]).unwrap();
        assert!(filter.apply(&data).is_empty());
    }

    #[test]
    fn test_column_regex_partial_match() {
        let data = rows();
        let descriptors = [ColumnDescriptor::new(1, "1").with_regex("an")];
        let filter = RowFilter::new("", &resolved(&descriptors)).unwrap();
        assert_eq!(names(&filter.apply(&data)), vec!["Ashton Cox"]);
    }

    #[test]
    fn test_column_regex_case_sensitive() {
        let data = rows();
        let descriptors = [ColumnDescriptor::new(1, "1").with_regex("tokyo")];
        let filter = RowFilter::new("", &resolved(&descriptors)).unwrap();
        assert!(filter.apply(&data).is_empty());
    }

    #[test]
    fn test_plain_column_search_not_applied() {
        let data = rows();
        let descriptors = [ColumnDescriptor::new(1, "1").with_search("Tokyo")];
        let filter = RowFilter::new("", &resolved(&descriptors)).unwrap();
        assert!(filter.is_noop());
        assert_eq!(filter.apply(&data).len(), 3);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let data = rows();
        let descriptors = [ColumnDescriptor::new(0, "0").with_regex("^A")];
        let filter = RowFilter::new("tokyo", &resolved(&descriptors)).unwrap();
        assert_eq!(names(&filter.apply(&data)), vec!["Airi Satou"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let descriptors = [ColumnDescriptor::new(1, "1").with_regex("(unclosed")];
        let err = RowFilter::new("", &resolved(&descriptors)).unwrap_err();
        assert!(matches!(err, TableError::InvalidPattern { ref column, .. } if column == "1"));
    }
}
