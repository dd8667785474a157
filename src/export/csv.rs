//! CSV export of a dataset or filtered view.

use std::io::Write;
use std::path::Path;

use crate::error::DashboardResult;
use crate::types::DataSet;

/// Conventional download name for the filtered rows.
pub const DEFAULT_CSV_FILE_NAME: &str = "filtered_kfh_data.csv";

/// Write `dataset` as comma-separated text with a header row.
///
/// Columns keep the schema order. Nulls are written as empty fields; floats always carry a
/// decimal point so the file loads back with the same types.
pub fn write_csv<W: Write>(dataset: &DataSet, writer: W) -> DashboardResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export `dataset` to a CSV file at `path`, replacing any existing file.
pub fn export_csv(dataset: &DataSet, path: impl AsRef<Path>) -> DashboardResult<()> {
    let path = path.as_ref();
    let _span = tracing::debug_span!("export_csv", path = %path.display(), rows = dataset.row_count())
        .entered();
    super::write_atomically(path, |out| write_csv(dataset, out))
}
