//! Terminal rendering: tables and horizontal bar charts.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use kfh_dashboard::dataset::{CategoryColumn, FilteredView};
use kfh_dashboard::summary::{Aggregates, SummaryRecord};

const BAR_WIDTH: usize = 40;

pub fn print_options(options: &[(CategoryColumn, Vec<String>)]) {
    for (column, values) in options {
        let mut table = styled_table();
        table.set_header(vec![header_cell(column.name()), header_cell("")]);
        for (i, value) in values.iter().enumerate() {
            table.add_row(vec![Cell::new(i + 1).fg(Color::DarkGrey), Cell::new(display_key(value))]);
        }
        println!("{table}");
    }
}

pub fn print_rows(view: &FilteredView, limit: usize) {
    println!("Filtered Results ({} rows)", view.row_count());
    let mut table = styled_table();
    table.set_header(view.schema().field_names().map(header_cell).collect::<Vec<_>>());
    for row in view.rows().iter().take(limit) {
        table.add_row(row.iter().map(|v| Cell::new(v.to_string())).collect::<Vec<_>>());
    }
    println!("{table}");
    if view.row_count() > limit {
        println!("... {} more rows", view.row_count() - limit);
    }
}

pub fn print_summary(summary: &SummaryRecord) {
    let mut table = styled_table();
    table.set_header(vec![header_cell("Summary"), header_cell("")]);
    for (label, value) in summary.lines() {
        table.add_row(vec![Cell::new(label), Cell::new(value).set_alignment(CellAlignment::Right)]);
    }
    println!("{table}");
}

pub fn print_charts(aggregates: &Aggregates) {
    let counts: Vec<_> = aggregates
        .counts_by_kfh
        .iter()
        .map(|c| (c.key.as_str(), c.count as f64, c.count.to_string()))
        .collect();
    print_bar_chart("Product Entries per KFHName", "KFHName", "Count", &counts);

    let means: Vec<_> = aggregates
        .mean_priority_by_section
        .iter()
        .map(|m| (m.key.as_str(), m.mean, format!("{:.2}", m.mean)))
        .collect();
    print_bar_chart(
        "Average Picking Priority by Section",
        "SectionName",
        "PickingPriority",
        &means,
    );

    let top: Vec<_> = aggregates
        .top_products
        .iter()
        .map(|c| (c.key.as_str(), c.count as f64, c.count.to_string()))
        .collect();
    let title = format!("Top {} Products by Frequency", aggregates.top_products.len());
    print_bar_chart(&title, "ProductName", "Count", &top);
}

/// `(label, magnitude, formatted value)` per bar; bars scale to the largest magnitude.
fn print_bar_chart(title: &str, label_header: &str, value_header: &str, bars: &[(&str, f64, String)]) {
    println!("{title}");
    if bars.is_empty() {
        println!("  (no data)");
        return;
    }
    let max = bars.iter().map(|(_, v, _)| *v).fold(0.0_f64, f64::max);

    let mut table = styled_table();
    table.set_header(vec![
        header_cell(label_header),
        header_cell(value_header),
        header_cell(""),
    ]);
    for (label, magnitude, value) in bars {
        table.add_row(vec![
            Cell::new(display_key(label)),
            Cell::new(value).set_alignment(CellAlignment::Right),
            Cell::new(bar(*magnitude, max)).fg(Color::Cyan),
        ]);
    }
    println!("{table}");
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
    "█".repeat(len)
}

fn display_key(key: &str) -> &str {
    if key.is_empty() { "(blank)" } else { key }
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}
