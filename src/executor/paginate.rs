//! Page windowing

use crate::dataset::Row;
use crate::query::PageWindow;

/// One page of an ordered result plus its counts
#[derive(Debug, Clone)]
pub struct Page<'d> {
    pub rows: Vec<&'d Row>,
    pub records_total: usize,
    pub records_filtered: usize,
}

/// Cuts ordered results into pages
pub struct Paginator;

impl Paginator {
    /// Slice `[start, start + length)` out of `rows`, clipped to what exists.
    ///
    /// Both counts are the size of `rows`; no unfiltered total is tracked.
    pub fn paginate<'d>(rows: Vec<&'d Row>, window: PageWindow) -> Page<'d> {
        let count = rows.len();
        let rows = rows
            .into_iter()
            .skip(window.start)
            .take(window.length)
            .collect();

        Page {
            rows,
            records_total: count,
            records_filtered: count,
        }
    }
}
