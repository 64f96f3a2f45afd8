//! Result sorting for table queries
//!
//! Single-column, lexicographic, stable. Descending order is the exact
//! reverse of the stable ascending order, so ties mirror as well.

use crate::dataset::Row;
use crate::query::SortDirection;

use super::resolver::ColumnAccessor;

/// Sorts filtered rows
pub struct RowSorter;

impl RowSorter {
    /// Sorts rows in place by the value at `accessor`
    pub fn sort(rows: &mut [&Row], accessor: &ColumnAccessor, direction: SortDirection) {
        rows.sort_by(|a, b| accessor.value(a).cmp(&accessor.value(b)));

        if direction == SortDirection::Desc {
            rows.reverse();
        }
    }
}
