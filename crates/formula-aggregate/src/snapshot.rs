//! JSON snapshot format for aggregate editor inputs.
//!
//! Keys follow the presentation layer's property names (`allColumns`, `canSelectMeasure`, ...)
//! so snapshots can be dumped from the front-end and replayed as-is.

use crate::column::{Column, ColumnCatalog};
use crate::fields::{FieldAssignment, FieldList};
use crate::inputs::AggregateInputs;
use crate::policy::PolicyFlags;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("column at index {index} has an empty name")]
    EmptyColumnName { index: usize },

    #[error("duplicate column: {column}")]
    DuplicateColumn { column: String },
}

/// One delivery of inputs to the aggregate editor.
///
/// `dimensionColumns` and `measureColumns` are required; a snapshot without a field assignment
/// is rejected rather than treated as empty. `allColumns` and the flags have defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSnapshot {
    #[serde(default)]
    pub all_columns: Vec<Column>,
    pub dimension_columns: Vec<String>,
    pub measure_columns: Vec<String>,
    #[serde(flatten)]
    pub flags: PolicyFlags,
}

impl AggregateSnapshot {
    /// Validate the catalog and convert into fresh [`AggregateInputs`].
    ///
    /// Column names must be non-empty and unique. Whitespace is significant; `" "` is a valid
    /// name. Assigned names are not checked against the
    /// catalog.
    pub fn into_inputs(self) -> Result<AggregateInputs, SnapshotError> {
        validate_columns(&self.all_columns)?;

        Ok(AggregateInputs::new(
            ColumnCatalog::from(self.all_columns),
            FieldAssignment::new(
                FieldList::from(self.dimension_columns),
                FieldList::from(self.measure_columns),
            ),
            self.flags,
        ))
    }
}

fn validate_columns(columns: &[Column]) -> Result<(), SnapshotError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        if column.name.is_empty() {
            return Err(SnapshotError::EmptyColumnName { index });
        }
        if !seen.insert(column.name.as_str()) {
            return Err(SnapshotError::DuplicateColumn {
                column: column.name.clone(),
            });
        }
    }
    Ok(())
}

/// Parse either a single snapshot object or an array of snapshots (an update sequence).
pub fn parse_snapshots(json: &str) -> Result<Vec<AggregateSnapshot>, SnapshotError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let snapshots = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(snapshots)
}
