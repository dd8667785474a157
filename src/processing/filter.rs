//! Row filtering for [`crate::types::DataSet`] and KFH filter selections.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dataset::{CategoryColumn, FilteredView, KfhDataset};
use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Allowed values for each of the three categorical columns.
///
/// There is no "match all" state: an empty set matches nothing. Use [`FilterSelection::all`]
/// to select every value present in a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(rename = "KFHName", default)]
    pub kfh: BTreeSet<String>,
    #[serde(rename = "RackName", default)]
    pub rack: BTreeSet<String>,
    #[serde(rename = "SectionName", default)]
    pub section: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new<K, R, S>(kfh: K, rack: R, section: S) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            kfh: kfh.into_iter().map(Into::into).collect(),
            rack: rack.into_iter().map(Into::into).collect(),
            section: section.into_iter().map(Into::into).collect(),
        }
    }

    /// Every distinct value of each column in `dataset`.
    pub fn all(dataset: &KfhDataset) -> Self {
        let mut out = Self::default();
        for column in CategoryColumn::ALL {
            *out.values_mut(column) = dataset.distinct_values(column).into_iter().collect();
        }
        out
    }

    /// Replace the allowed values of one column.
    #[must_use]
    pub fn with<I>(mut self, column: CategoryColumn, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        *self.values_mut(column) = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn values(&self, column: CategoryColumn) -> &BTreeSet<String> {
        match column {
            CategoryColumn::Kfh => &self.kfh,
            CategoryColumn::Rack => &self.rack,
            CategoryColumn::Section => &self.section,
        }
    }

    pub fn values_mut(&mut self, column: CategoryColumn) -> &mut BTreeSet<String> {
        match column {
            CategoryColumn::Kfh => &mut self.kfh,
            CategoryColumn::Rack => &mut self.rack,
            CategoryColumn::Section => &mut self.section,
        }
    }

    /// Whether `key` is an allowed value of `column`.
    pub fn allows(&self, column: CategoryColumn, key: &str) -> bool {
        self.values(column).contains(key)
    }

    /// True when at least one column has no allowed values.
    pub fn is_vacuous(&self) -> bool {
        CategoryColumn::ALL.iter().any(|c| self.values(*c).is_empty())
    }
}

/// Keep the rows whose KFH, rack and section values are all allowed by `selection`.
///
/// Row order is preserved. Values outside the dataset's domain simply match nothing.
pub fn filter_by_selection(dataset: &KfhDataset, selection: &FilterSelection) -> FilteredView {
    if selection.is_vacuous() {
        tracing::debug!("empty selection set, view is empty");
        return dataset.with_rows(Vec::new());
    }

    let cols = dataset.columns();
    let view = filter(dataset.data(), |row| {
        CategoryColumn::ALL.iter().all(|&column| {
            row.get(cols.category(column))
                .is_some_and(|v| selection.allows(column, &v.category_key()))
        })
    });
    tracing::debug!(
        input_rows = dataset.row_count(),
        output_rows = view.row_count(),
        "applied filter selection"
    );
    dataset.with_rows(view.rows)
}
