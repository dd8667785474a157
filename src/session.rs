//! Session-scoped dashboard state.
//!
//! A [`Session`] owns one loaded dataset and the current filter selection. Every query
//! recomputes from those two; nothing derived is cached.

use std::path::Path;

use crate::dataset::{CategoryColumn, FilteredView, KfhDataset};
use crate::error::DashboardResult;
use crate::ingestion::{load_from_path, LoadOptions};
use crate::processing::{filter_by_selection, FilterSelection};
use crate::summary::{aggregate_with_limit, summarize, Aggregates, SummaryRecord, DEFAULT_TOP_PRODUCTS};

#[derive(Debug, Clone)]
pub struct Session {
    dataset: KfhDataset,
    selection: FilterSelection,
}

impl Session {
    /// Start a session over `dataset` with every value of every filter selected.
    pub fn new(dataset: KfhDataset) -> Self {
        let selection = FilterSelection::all(&dataset);
        Self { dataset, selection }
    }

    /// Load `path` and start a session over it.
    pub fn open(path: impl AsRef<Path>, options: &LoadOptions) -> DashboardResult<Self> {
        load_from_path(path, options).map(Self::new)
    }

    pub fn dataset(&self) -> &KfhDataset {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    /// Replace the allowed values of one filter column.
    pub fn select<I>(&mut self, column: CategoryColumn, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        *self.selection.values_mut(column) = values.into_iter().map(Into::into).collect();
    }

    /// Select every value of every column again.
    pub fn reset_selection(&mut self) {
        self.selection = FilterSelection::all(&self.dataset);
    }

    /// The selectable values of a filter column, in first-seen order.
    pub fn options(&self, column: CategoryColumn) -> Vec<String> {
        self.dataset.distinct_values(column)
    }

    pub fn view(&self) -> FilteredView {
        filter_by_selection(&self.dataset, &self.selection)
    }

    pub fn summary(&self) -> SummaryRecord {
        summarize(&self.view())
    }

    pub fn aggregates(&self) -> Aggregates {
        self.aggregates_with_limit(DEFAULT_TOP_PRODUCTS)
    }

    pub fn aggregates_with_limit(&self, top: usize) -> Aggregates {
        aggregate_with_limit(&self.view(), top)
    }
}
