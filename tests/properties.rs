use std::collections::BTreeSet;

use proptest::prelude::*;

use kfh_dashboard::dataset::{CategoryColumn, KfhDataset};
use kfh_dashboard::export::write_csv;
use kfh_dashboard::ingestion::load_from_reader;
use kfh_dashboard::processing::{filter_by_selection, FilterSelection};
use kfh_dashboard::summary::{aggregate, summarize, AveragePriority};
use kfh_dashboard::types::{DataSet, DataType, Field, Schema, Value};

const KFHS: [&str; 3] = ["North", "South", "East"];
const RACKS: [&str; 4] = ["R1", "R2", "R3", "R4"];
const SECTIONS: [&str; 3] = ["Dairy", "Bakery", "Produce"];
const PRODUCTS: [&str; 14] = [
    "Milk 1L", "Yogurt", "Bread", "Apples", "Bananas", "Croissant", "Tomatoes, vine", "Eggs",
    "Butter", "Cheese \"aged\"", "Rice", "Pasta", "Flour", "Tea",
];

type Row = (usize, usize, usize, usize, Option<u8>);

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        0..KFHS.len(),
        0..RACKS.len(),
        0..SECTIONS.len(),
        0..PRODUCTS.len(),
        prop::option::weighted(0.9, 1u8..=5),
    )
}

fn build(rows: &[Row]) -> KfhDataset {
    let schema = Schema::new(vec![
        Field::new("KFHName", DataType::Utf8),
        Field::new("RackName", DataType::Utf8),
        Field::new("SectionName", DataType::Utf8),
        Field::new("ProductName", DataType::Utf8),
        Field::new("PickingPriority", DataType::Float64),
    ]);
    let rows = rows
        .iter()
        .map(|&(k, r, s, p, prio)| {
            vec![
                Value::Utf8(KFHS[k].to_string()),
                Value::Utf8(RACKS[r].to_string()),
                Value::Utf8(SECTIONS[s].to_string()),
                Value::Utf8(PRODUCTS[p].to_string()),
                prio.map_or(Value::Null, |v| Value::Float64(f64::from(v))),
            ]
        })
        .collect();
    KfhDataset::new(DataSet::new(schema, rows)).unwrap()
}

fn subset(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(pool, 0..=pool.len())
}

fn selection_strategy() -> impl Strategy<Value = FilterSelection> {
    (subset(&KFHS), subset(&RACKS), subset(&SECTIONS))
        .prop_map(|(k, r, s)| FilterSelection::new(k, r, s))
}

proptest! {
    #[test]
    fn view_is_an_ordered_subsequence_matching_the_selection(
        rows in prop::collection::vec(row_strategy(), 0..60),
        selection in selection_strategy(),
    ) {
        let ds = build(&rows);
        let view = filter_by_selection(&ds, &selection);

        let mut source = ds.rows().iter();
        for row in view.rows() {
            prop_assert!(source.any(|r| r == row), "row out of order or not from the source");
            for column in CategoryColumn::ALL {
                let idx = ds.columns().category(column);
                prop_assert!(selection.allows(column, &row[idx].category_key()));
            }
        }

        let expected = ds
            .rows()
            .iter()
            .filter(|row| {
                CategoryColumn::ALL
                    .iter()
                    .all(|&c| selection.allows(c, &row[ds.columns().category(c)].category_key()))
            })
            .count();
        prop_assert_eq!(view.row_count(), expected);
    }

    #[test]
    fn any_empty_set_gives_an_empty_view(
        rows in prop::collection::vec(row_strategy(), 0..40),
        selection in selection_strategy(),
        emptied in prop::sample::select(CategoryColumn::ALL.to_vec()),
    ) {
        let ds = build(&rows);
        let selection = selection.with(emptied, Vec::<String>::new());
        let view = filter_by_selection(&ds, &selection);

        prop_assert!(view.is_empty());
        let summary = summarize(&view);
        prop_assert_eq!(summary.total_entries, 0);
        prop_assert_eq!(summary.unique_products, 0);
        prop_assert_eq!(summary.avg_priority, AveragePriority::NoData);
        prop_assert!(!summary.avg_priority.to_string().contains("NaN"));
    }

    #[test]
    fn selecting_all_values_changes_nothing(rows in prop::collection::vec(row_strategy(), 0..60)) {
        let ds = build(&rows);
        let view = filter_by_selection(&ds, &FilterSelection::all(&ds));

        prop_assert_eq!(&view, &ds);
        prop_assert_eq!(summarize(&view), summarize(&ds));
        prop_assert_eq!(aggregate(&view), aggregate(&ds));
    }

    #[test]
    fn summary_matches_a_direct_computation(rows in prop::collection::vec(row_strategy(), 0..60)) {
        let ds = build(&rows);
        let summary = summarize(&ds);

        prop_assert_eq!(summary.total_entries, rows.len());
        let products: BTreeSet<_> = rows.iter().map(|r| r.3).collect();
        prop_assert_eq!(summary.unique_products, products.len());

        let priorities: Vec<f64> = rows.iter().filter_map(|r| r.4).map(f64::from).collect();
        if priorities.is_empty() {
            prop_assert_eq!(summary.avg_priority, AveragePriority::NoData);
        } else {
            let mean = priorities.iter().sum::<f64>() / priorities.len() as f64;
            let expected = (mean * 100.0).round() / 100.0;
            prop_assert_eq!(summary.avg_priority, AveragePriority::Value(expected));
        }
    }

    #[test]
    fn top_products_are_capped_and_sorted(rows in prop::collection::vec(row_strategy(), 0..80)) {
        let ds = build(&rows);
        let top = aggregate(&ds).top_products;

        let distinct: BTreeSet<_> = rows.iter().map(|r| r.3).collect();
        prop_assert_eq!(top.len(), distinct.len().min(10));
        for pair in top.windows(2) {
            prop_assert!(
                pair[0].count > pair[1].count
                    || (pair[0].count == pair[1].count && pair[0].key < pair[1].key)
            );
        }
    }

    #[test]
    fn csv_export_reloads_with_the_same_schema(
        rows in prop::collection::vec(row_strategy(), 0..40),
        selection in selection_strategy(),
    ) {
        let ds = build(&rows);
        let view = filter_by_selection(&ds, &selection);

        let mut buf = Vec::new();
        write_csv(view.data(), &mut buf).unwrap();
        let reloaded = load_from_reader(buf.as_slice(), Some(view.schema())).unwrap();

        prop_assert_eq!(reloaded, view);
    }
}
