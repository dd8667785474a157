//! The KFH record schema over a generic [`DataSet`].
//!
//! [`KfhDataset`] resolves the five required columns once, when it is constructed, so the
//! filter and aggregation stages never look columns up by name.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::types::{DataSet, Schema, Value};

/// Warehouse (KFH) name column.
pub const KFH_NAME: &str = "KFHName";
/// Rack name column.
pub const RACK_NAME: &str = "RackName";
/// Section name column.
pub const SECTION_NAME: &str = "SectionName";
/// Product name column.
pub const PRODUCT_NAME: &str = "ProductName";
/// Numeric picking priority column.
pub const PICKING_PRIORITY: &str = "PickingPriority";

/// Columns that are always read as text, whatever their contents look like.
pub const TEXT_COLUMNS: [&str; 4] = [KFH_NAME, RACK_NAME, SECTION_NAME, PRODUCT_NAME];

/// The three categorical columns used as filter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryColumn {
    #[serde(rename = "KFHName")]
    Kfh,
    #[serde(rename = "RackName")]
    Rack,
    #[serde(rename = "SectionName")]
    Section,
}

impl CategoryColumn {
    /// All filter columns, in display order.
    pub const ALL: [CategoryColumn; 3] = [Self::Kfh, Self::Rack, Self::Section];

    /// Column header name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Kfh => KFH_NAME,
            Self::Rack => RACK_NAME,
            Self::Section => SECTION_NAME,
        }
    }
}

/// Resolved positions of the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KfhColumns {
    pub kfh: usize,
    pub rack: usize,
    pub section: usize,
    pub product: usize,
    pub priority: usize,
}

impl KfhColumns {
    /// Resolve and type-check the required columns against `schema`.
    pub fn resolve(schema: &Schema) -> DashboardResult<Self> {
        let find = |name: &str| {
            schema.index_of(name).ok_or_else(|| {
                DashboardError::schema(format!(
                    "missing required column '{name}'. headers={:?}",
                    schema.field_names().collect::<Vec<_>>()
                ))
            })
        };

        let cols = Self {
            kfh: find(KFH_NAME)?,
            rack: find(RACK_NAME)?,
            section: find(SECTION_NAME)?,
            product: find(PRODUCT_NAME)?,
            priority: find(PICKING_PRIORITY)?,
        };

        let priority_type = schema.fields[cols.priority].data_type;
        if !priority_type.is_numeric() {
            return Err(DashboardError::schema(format!(
                "column '{PICKING_PRIORITY}' must be numeric, found {priority_type:?}"
            )));
        }
        Ok(cols)
    }

    /// Index of a categorical filter column.
    pub fn category(&self, column: CategoryColumn) -> usize {
        match column {
            CategoryColumn::Kfh => self.kfh,
            CategoryColumn::Rack => self.rack,
            CategoryColumn::Section => self.section,
        }
    }
}

/// A [`DataSet`] validated against the KFH record schema.
///
/// Immutable once built; filtering produces a new `KfhDataset` with the same schema.
#[derive(Debug, Clone, PartialEq)]
pub struct KfhDataset {
    data: DataSet,
    columns: KfhColumns,
}

/// The rows of a dataset that match a filter selection.
pub type FilteredView = KfhDataset;

impl KfhDataset {
    /// Validate `data` and wrap it.
    ///
    /// Fails with [`DashboardError::SchemaMismatch`] when a required column is absent or
    /// `PickingPriority` is not numeric.
    pub fn new(data: DataSet) -> DashboardResult<Self> {
        let columns = KfhColumns::resolve(&data.schema)?;
        Ok(Self { data, columns })
    }

    /// Build a dataset sharing this one's schema from a subset of its rows.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<Value>>) -> Self {
        Self {
            data: DataSet::new(self.data.schema.clone(), rows),
            columns: self.columns,
        }
    }

    /// Underlying generic dataset (all columns, including non-required ones).
    pub fn data(&self) -> &DataSet {
        &self.data
    }

    pub fn into_data(self) -> DataSet {
        self.data
    }

    pub fn schema(&self) -> &Schema {
        &self.data.schema
    }

    pub fn columns(&self) -> KfhColumns {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.data.rows
    }

    pub fn row_count(&self) -> usize {
        self.data.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Distinct category keys of `column`, in first-seen order.
    pub fn distinct_values(&self, column: CategoryColumn) -> Vec<String> {
        let idx = self.columns.category(column);
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for value in self.data.column(idx) {
            let key = value.category_key();
            if !seen.contains(key.as_ref()) {
                seen.insert(key.clone().into_owned());
                out.push(key.into_owned());
            }
        }
        out
    }
}
