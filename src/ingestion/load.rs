//! Dataset loading entrypoint.
//!
//! Most callers should use [`load_from_path`], which reads a CSV file into a validated
//! [`KfhDataset`].
//!
//! - If [`LoadOptions::schema`] is `None`, column types are inferred from the data.
//! - If a [`LoadObserver`] is provided, success/failure/alerts are reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::dataset::KfhDataset;
use crate::error::DashboardResult;
use crate::types::Schema;

use super::csv;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Options controlling dataset loading.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Explicit schema to parse values with. If `None`, types are inferred per column.
    pub schema: Option<Schema>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("schema_fields", &self.schema.as_ref().map(|s| s.fields.len()))
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            schema: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a KFH dataset from a CSV file.
///
/// Reads the file, then validates the required columns (see [`KfhDataset::new`]). Nothing is
/// returned on failure; there is no partial load.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use kfh_dashboard::ingestion::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), kfh_dashboard::DashboardError> {
/// let ds = load_from_path("kfh.csv", &LoadOptions::default())?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> DashboardResult<KfhDataset> {
    let path = path.as_ref();
    let _span = tracing::debug_span!("load", path = %path.display()).entered();

    let result = csv::ingest_csv_from_path(path, options.schema.as_ref()).and_then(KfhDataset::new);

    if let Some(obs) = options.observer.as_ref() {
        let ctx = LoadContext {
            path: path.to_path_buf(),
        };
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: ds.row_count(),
                    columns: ds.schema().fields.len(),
                },
            ),
            Err(e) => {
                let sev = LoadSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Load a KFH dataset from any CSV byte source.
pub fn load_from_reader<R: std::io::Read>(reader: R, schema: Option<&Schema>) -> DashboardResult<KfhDataset> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let data = csv::ingest_csv_from_reader(&mut rdr, schema)?;
    tracing::debug!(rows = data.row_count(), "dataset read from reader");
    KfhDataset::new(data)
}
