use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across the crate.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Error type returned by loading, schema validation and export.
///
/// A single enum shared by every stage; use [`DashboardError::kind`] to tell load, schema and
/// export failures apart.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Underlying I/O error (e.g. file not found, permission denied, disk full).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error (malformed file, ragged rows, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The data does not conform to the expected schema (missing required columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// PDF document construction failed.
    #[error("pdf error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// A finished export could not be moved to its destination.
    #[error("failed to persist export: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// Writing an export artifact failed.
    #[error("failed to export {}: {source}", path.display())]
    Export {
        path: PathBuf,
        source: Box<DashboardError>,
    },
}

/// Coarse classification of a [`DashboardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source could not be read or parsed.
    DataLoad,
    /// Required columns are missing or mistyped.
    Schema,
    /// Writing an export artifact failed.
    Export,
}

impl DashboardError {
    /// Classify the error.
    ///
    /// File exports wrap whatever went wrong in [`DashboardError::Export`], so bare I/O and CSV
    /// errors come from reading.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) | Self::Csv(_) | Self::ParseError { .. } => ErrorKind::DataLoad,
            Self::SchemaMismatch { .. } => ErrorKind::Schema,
            Self::Pdf(_) | Self::Persist(_) | Self::Export { .. } => ErrorKind::Export,
        }
    }

    pub(crate) fn export(path: impl Into<PathBuf>, source: DashboardError) -> Self {
        Self::Export {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }
}
