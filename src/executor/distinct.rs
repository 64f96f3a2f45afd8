//! Distinct column values
//!
//! Feeds per-column filter drop-downs. Works on the whole dataset and does
//! not go through the query pipeline.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::dataset::Dataset;

use super::resolver::ColumnAccessor;

/// Sorted unique values per requested column address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DistinctValues(BTreeMap<String, Vec<String>>);

impl DistinctValues {
    /// Compute distinct values for a comma-separated address list.
    ///
    /// Addresses that are not valid for the dataset are skipped. An absent
    /// or empty list, or an empty dataset, yields an empty result.
    pub fn compute(dataset: &Dataset, columns: Option<&str>) -> Self {
        let mut result = BTreeMap::new();

        let (columns, first) = match (columns, dataset.first()) {
            (Some(columns), Some(first)) if !columns.is_empty() => (columns, first),
            _ => return Self(result),
        };

        for raw in columns.split(',') {
            let accessor = match ColumnAccessor::parse_address(dataset.shape(), raw) {
                Some(accessor) if accessor.exists_in(first) => accessor,
                _ => continue,
            };

            let values: BTreeSet<&str> = dataset
                .rows()
                .iter()
                .filter_map(|row| accessor.value(row))
                .collect();

            result.insert(
                accessor.address(),
                values.into_iter().map(str::to_string).collect(),
            );
        }

        Self(result)
    }

    /// Values for one address
    pub fn get(&self, address: &str) -> Option<&[String]> {
        self.0.get(address).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
