//! Column reductions for [`crate::types::DataSet`].

use std::collections::HashSet;

use crate::types::{DataSet, Value};

/// Mean of the numeric values in column `idx`, or `None` when there are none.
///
/// Nulls, text and non-finite floats are skipped, so the result is never NaN.
pub fn mean(dataset: &DataSet, idx: usize) -> Option<f64> {
    let (sum, n) = dataset
        .column(idx)
        .filter_map(finite_f64)
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Number of distinct non-null values in column `idx`.
pub fn count_distinct(dataset: &DataSet, idx: usize) -> usize {
    dataset
        .column(idx)
        .filter(|v| !v.is_null())
        .map(|v| v.category_key())
        .collect::<HashSet<_>>()
        .len()
}

/// The numeric value of `value` when it is a finite number.
pub(crate) fn finite_f64(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}
