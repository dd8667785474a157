//! `kfh-dashboard` loads a CSV of warehouse (KFH) attendance/product records, filters it by KFH,
//! rack and section, and summarizes what is left.
//!
//! The pipeline is three pure stages over an immutable, schema-validated dataset:
//!
//! 1. **Load**: [`ingestion::load_from_path`] reads the CSV into a [`dataset::KfhDataset`],
//!    inferring column types and checking the required columns (`KFHName`, `RackName`,
//!    `SectionName`, `ProductName`, numeric `PickingPriority`).
//! 2. **Filter**: [`processing::filter_by_selection`] keeps the rows whose three categorical
//!    values are all in the [`processing::FilterSelection`]. An empty set matches nothing.
//! 3. **Summarize**: [`summary::summarize`] and [`summary::aggregate`] compute the
//!    [`summary::SummaryRecord`] and the per-KFH / per-section / top-product tables.
//!
//! [`session::Session`] bundles a dataset with the current selection, and [`export`] writes the
//! filtered rows as CSV and the summary as a one-page PDF.
//!
//! ## Example
//!
//! ```rust
//! use kfh_dashboard::dataset::CategoryColumn;
//! use kfh_dashboard::ingestion::load_from_reader;
//! use kfh_dashboard::session::Session;
//! use kfh_dashboard::summary::AveragePriority;
//!
//! let csv = "KFHName,RackName,SectionName,ProductName,PickingPriority\n\
//!            A,R1,S1,P1,3\n\
//!            A,R1,S2,P2,5\n\
//!            B,R2,S1,P1,1\n";
//!
//! let mut session = Session::new(load_from_reader(csv.as_bytes(), None).unwrap());
//! session.select(CategoryColumn::Kfh, ["A"]);
//! session.select(CategoryColumn::Rack, ["R1"]);
//!
//! let summary = session.summary();
//! assert_eq!(summary.total_entries, 2);
//! assert_eq!(summary.unique_products, 2);
//! assert_eq!(summary.avg_priority, AveragePriority::Value(4.0));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV loading, type inference, load observers
//! - [`types`]: schema + in-memory dataset types
//! - [`dataset`]: the KFH column schema over a dataset
//! - [`processing`]: filter/reduce/group-by transformations
//! - [`summary`]: summary record and aggregate tables
//! - [`session`]: session-scoped dataset + selection
//! - [`export`]: CSV and PDF artifacts
//! - [`logging`]: `tracing-subscriber` setup for the binary
//! - [`error`]: the shared error type

pub mod dataset;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod logging;
pub mod processing;
pub mod session;
pub mod summary;
pub mod types;

pub use error::{DashboardError, DashboardResult, ErrorKind};
