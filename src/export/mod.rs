//! Download artifacts: the filtered rows as CSV and the summary as a one-page PDF.
//!
//! Files are written through a temporary file in the destination directory and then persisted
//! over the target path, so a failed export never leaves a partial file behind.

pub mod csv;
pub mod pdf;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DashboardError, DashboardResult};

pub use self::csv::{export_csv, write_csv, DEFAULT_CSV_FILE_NAME};
pub use self::pdf::{export_pdf, render_pdf, DEFAULT_PDF_FILE_NAME, REPORT_TITLE};

/// Write `path` by streaming into a temp file next to it, then renaming it into place.
///
/// Any failure is reported as [`DashboardError::Export`] for `path`.
fn write_atomically<F>(path: &Path, write: F) -> DashboardResult<()>
where
    F: FnOnce(&mut BufWriter<&File>) -> DashboardResult<()>,
{
    write_through_temp(path, write).map_err(|e| DashboardError::export(path, e))?;
    tracing::info!(path = %path.display(), "export written");
    Ok(())
}

fn write_through_temp<F>(path: &Path, write: F) -> DashboardResult<()>
where
    F: FnOnce(&mut BufWriter<&File>) -> DashboardResult<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file());
        write(&mut out)?;
        out.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
