//! Summary statistics and aggregate tables over a filtered view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::FilteredView;
use crate::processing::group::{count_by, mean_by, top_n, CategoryCount, CategoryMean};
use crate::processing::reduce::{count_distinct, mean};

/// Default number of products in [`Aggregates::top_products`].
pub const DEFAULT_TOP_PRODUCTS: usize = 10;

/// Average picking priority of a view.
///
/// An average over zero rows is `NoData`, never NaN. Serializes as a number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum AveragePriority {
    /// Mean rounded to 2 decimal places.
    Value(f64),
    NoData,
}

impl AveragePriority {
    /// Round `mean` to 2 decimals (half away from zero); `None` becomes `NoData`.
    pub fn from_mean(mean: Option<f64>) -> Self {
        match mean {
            Some(m) if m.is_finite() => Self::Value(round2(m)),
            _ => Self::NoData,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::NoData => None,
        }
    }
}

impl From<Option<f64>> for AveragePriority {
    fn from(value: Option<f64>) -> Self {
        value.map(Self::Value).unwrap_or(Self::NoData)
    }
}

impl From<AveragePriority> for Option<f64> {
    fn from(value: AveragePriority) -> Self {
        value.value()
    }
}

impl fmt::Display for AveragePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.2}"),
            Self::NoData => f.write_str("n/a"),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Scalar statistics over a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub total_entries: usize,
    pub unique_products: usize,
    pub avg_priority: AveragePriority,
}

impl SummaryRecord {
    /// Labelled lines in display order, as used by the PDF report and the CLI.
    pub fn lines(&self) -> [(&'static str, String); 3] {
        [
            ("Total Entries", self.total_entries.to_string()),
            ("Unique Products", self.unique_products.to_string()),
            ("Average Picking Priority", self.avg_priority.to_string()),
        ]
    }
}

/// The three aggregate tables behind the dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Rows per `KFHName`, descending count, ties by name.
    pub counts_by_kfh: Vec<CategoryCount>,
    /// Mean `PickingPriority` per `SectionName`, by section name.
    pub mean_priority_by_section: Vec<CategoryMean>,
    /// Most frequent `ProductName` values, descending count, ties by name.
    pub top_products: Vec<CategoryCount>,
}

/// Compute the [`SummaryRecord`] of a view.
pub fn summarize(view: &FilteredView) -> SummaryRecord {
    let cols = view.columns();
    let summary = SummaryRecord {
        total_entries: view.row_count(),
        unique_products: count_distinct(view.data(), cols.product),
        avg_priority: AveragePriority::from_mean(mean(view.data(), cols.priority)),
    };
    tracing::debug!(
        total_entries = summary.total_entries,
        unique_products = summary.unique_products,
        avg_priority = %summary.avg_priority,
        "summarized view"
    );
    summary
}

/// Compute the aggregate tables of a view with the default top-10 product ranking.
pub fn aggregate(view: &FilteredView) -> Aggregates {
    aggregate_with_limit(view, DEFAULT_TOP_PRODUCTS)
}

/// Compute the aggregate tables of a view, keeping `top` products.
pub fn aggregate_with_limit(view: &FilteredView, top: usize) -> Aggregates {
    let cols = view.columns();
    let data = view.data();
    Aggregates {
        counts_by_kfh: count_by(data, cols.kfh),
        mean_priority_by_section: mean_by(data, cols.section, cols.priority),
        top_products: top_n(count_by(data, cols.product), top),
    }
}
