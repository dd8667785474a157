//! In-memory dataset transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by loading.
//! Everything here is a pure function of its inputs.
//!
//! - [`filter()`]: row filtering by predicate, and [`filter_by_selection`] for KFH selections
//! - [`reduce`]: column reductions (mean, distinct count)
//! - [`group`]: per-category counts and means, top-N rankings
//!
//! ## Example: filter, then reduce
//!
//! ```rust
//! use kfh_dashboard::processing::{filter, mean};
//! use kfh_dashboard::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("section", DataType::Utf8),
//!     Field::new("priority", DataType::Float64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("S1".to_string()), Value::Float64(2.0)],
//!         vec![Value::Utf8("S2".to_string()), Value::Float64(8.0)],
//!         vec![Value::Utf8("S1".to_string()), Value::Float64(4.0)],
//!     ],
//! );
//!
//! let idx = ds.schema.index_of("section").unwrap();
//! let s1 = filter(&ds, |row| matches!(row.get(idx), Some(Value::Utf8(s)) if s == "S1"));
//!
//! let priority = ds.schema.index_of("priority").unwrap();
//! assert_eq!(mean(&s1, priority), Some(3.0));
//! ```

pub mod filter;
pub mod group;
pub mod reduce;

pub use filter::{filter, filter_by_selection, FilterSelection};
pub use group::{count_by, mean_by, top_n, CategoryCount, CategoryMean};
pub use reduce::{count_distinct, mean};
