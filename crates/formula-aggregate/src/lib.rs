//! Disabled-column classification for the aggregate column editor.
//!
//! The aggregate editor lets a user drag catalog columns into two drop targets: *dimensions*
//! (group-by columns) and *measures* (aggregated columns). Which columns may be dragged depends
//! on the column type, on the current assignment and on two policy flags. This crate focuses on:
//! - Classifying a catalog into the set of disabled column names ([`disabled_column_names`]).
//! - Memoizing that set so it is only recomputed when one of its inputs changes identity
//!   ([`DisabledColumnsCache`]).
//! - A serde-friendly snapshot format for feeding inputs across process boundaries
//!   ([`AggregateSnapshot`]).
//!
//! Inputs are compared by identity, not by value. [`ColumnCatalog`] and [`FieldList`] are
//! immutable shared slices; building a new one always counts as a change, even when its
//! contents equal the previous one. Callers that want the cache to be reused must hand back the
//! same instances (see [`AggregateInputs::reusing`]).

#![forbid(unsafe_code)]

mod cache;
mod classify;
mod column;
mod drag;
mod fields;
mod inputs;
mod policy;
mod serde_defaults;
mod snapshot;

pub use crate::cache::{CacheState, DisabledColumnsCache, InputChanges};
pub use crate::classify::{
    classify_column, disabled_column_names, AssignedNames, DisabledColumnSet, DisabledReason,
};
pub use crate::column::{Column, ColumnCatalog, ColumnType, NOT_SUPPORTED_TYPES};
pub use crate::drag::DragRejected;
pub use crate::fields::{FieldAssignment, FieldList};
pub use crate::inputs::AggregateInputs;
pub use crate::policy::{MeasureArea, PolicyFlags};
pub use crate::snapshot::{parse_snapshots, AggregateSnapshot, SnapshotError};
