//! Dataset loading.
//!
//! Most callers should use [`load_from_path`] (from [`load`]) which:
//!
//! - reads a comma-separated file with a header row into an in-memory [`crate::types::DataSet`]
//! - infers column types, or parses with a caller-provided [`crate::types::Schema`]
//! - validates the KFH columns, producing a [`crate::dataset::KfhDataset`]
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! The raw CSV reader lives in [`csv`].

pub mod csv;
pub mod load;
pub mod observability;

pub use load::{load_from_path, load_from_reader, LoadOptions};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
