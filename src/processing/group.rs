//! Group-by aggregations over one categorical column.
//!
//! Output ordering is always deterministic: the map from key to accumulator is a `BTreeMap`,
//! and count rankings break ties by key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::DataSet;

use super::reduce::finite_f64;

/// Number of rows for one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub key: String,
    pub count: usize,
}

/// Mean of a numeric column for one category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMean {
    pub key: String,
    pub mean: f64,
}

/// Rows per distinct value of column `idx`, sorted by descending count then ascending key.
pub fn count_by(dataset: &DataSet, idx: usize) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in dataset.column(idx) {
        *counts.entry(value.category_key().into_owned()).or_insert(0) += 1;
    }

    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(key, count)| CategoryCount { key, count })
        .collect();
    // Stable sort over key-ordered input: equal counts stay in key order.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Mean of column `value_idx` per distinct value of column `group_idx`, sorted by key.
///
/// Nulls and non-finite values are ignored; groups with no numeric values are omitted.
pub fn mean_by(dataset: &DataSet, group_idx: usize, value_idx: usize) -> Vec<CategoryMean> {
    let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in &dataset.rows {
        let (Some(group), Some(v)) = (row.get(group_idx), row.get(value_idx).and_then(finite_f64))
        else {
            continue;
        };
        let entry = acc.entry(group.category_key().into_owned()).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }

    acc.into_iter()
        .map(|(key, (sum, n))| CategoryMean {
            key,
            mean: sum / n as f64,
        })
        .collect()
}

/// The `n` largest entries of a ranking produced by [`count_by`].
pub fn top_n(mut counts: Vec<CategoryCount>, n: usize) -> Vec<CategoryCount> {
    counts.truncate(n);
    counts
}

#[cfg(test)]
mod tests {
    use super::{count_by, mean_by, top_n, CategoryCount, CategoryMean};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn dataset(rows: &[(&str, Option<f64>)]) -> DataSet {
        let schema = Schema::new(vec![
            Field::new("group", DataType::Utf8),
            Field::new("value", DataType::Float64),
        ]);
        DataSet::new(
            schema,
            rows.iter()
                .map(|(g, v)| {
                    vec![
                        Value::Utf8((*g).to_string()),
                        v.map(Value::Float64).unwrap_or(Value::Null),
                    ]
                })
                .collect(),
        )
    }

    fn cc(key: &str, count: usize) -> CategoryCount {
        CategoryCount {
            key: key.to_string(),
            count,
        }
    }

    #[test]
    fn count_by_orders_by_count_then_key() {
        let ds = dataset(&[("b", None), ("c", None), ("a", None), ("c", None), ("b", None)]);
        assert_eq!(count_by(&ds, 0), vec![cc("b", 2), cc("c", 2), cc("a", 1)]);
    }

    #[test]
    fn mean_by_skips_nulls_and_empty_groups() {
        let ds = dataset(&[("s2", Some(4.0)), ("s1", Some(1.0)), ("s2", None), ("s1", Some(2.0)), ("s3", None)]);
        assert_eq!(
            mean_by(&ds, 0, 1),
            vec![
                CategoryMean {
                    key: "s1".to_string(),
                    mean: 1.5
                },
                CategoryMean {
                    key: "s2".to_string(),
                    mean: 4.0
                },
            ]
        );
    }

    #[test]
    fn mean_by_skips_non_finite_values() {
        let ds = dataset(&[("s1", Some(2.0)), ("s1", Some(f64::NAN)), ("s2", Some(f64::INFINITY))]);
        let means = mean_by(&ds, 0, 1);
        assert_eq!(
            means,
            vec![CategoryMean {
                key: "s1".to_string(),
                mean: 2.0
            }]
        );
    }

    #[test]
    fn top_n_truncates_only_when_longer() {
        let ranking = vec![cc("a", 3), cc("b", 2), cc("c", 1)];
        assert_eq!(top_n(ranking.clone(), 2), vec![cc("a", 3), cc("b", 2)]);
        assert_eq!(top_n(ranking.clone(), 10), ranking);
    }
}
