//! The column classifier: decides which catalog columns are disabled in the column picker.

use crate::column::{Column, ColumnCatalog, ColumnType};
use crate::fields::FieldAssignment;
use crate::policy::PolicyFlags;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Why a column is disabled. When several rules apply, the first one listed here wins.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DisabledReason {
    /// The column type can never be dragged anywhere (see [`crate::NOT_SUPPORTED_TYPES`]).
    UnsupportedType(ColumnType),
    /// Measure selection is off and the column is already both a dimension and a measure.
    MeasureLocked,
    /// Dual-role use is off and the column is already a dimension or a measure.
    AlreadyAssigned,
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisabledReason::UnsupportedType(ty) => write!(f, "columns of type {ty} are not supported"),
            DisabledReason::MeasureLocked => {
                f.write_str("already used as a dimension and a measure while measure selection is disabled")
            }
            DisabledReason::AlreadyAssigned => f.write_str(
                "already assigned and columns may not be both a dimension and a measure",
            ),
        }
    }
}

/// Set of disabled column names, each tagged with the rule that disabled it.
///
/// Iteration is ordered by name. Serializes as a plain list of names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisabledColumnSet {
    columns: BTreeMap<String, DisabledReason>,
}

impl DisabledColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn reason(&self, name: &str) -> Option<&DisabledReason> {
        self.columns.get(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DisabledReason)> + '_ {
        self.columns.iter().map(|(name, reason)| (name.as_str(), reason))
    }

    fn insert(&mut self, name: &str, reason: DisabledReason) {
        // Catalog names are unique; keep the first reason if a caller broke that contract.
        self.columns.entry(name.to_string()).or_insert(reason);
    }
}

impl Serialize for DisabledColumnSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.columns.keys())
    }
}

/// Column names currently assigned, pre-combined for classification.
#[derive(Clone, Debug, Default)]
pub struct AssignedNames<'a> {
    in_either: HashSet<&'a str>,
    in_both: HashSet<&'a str>,
}

impl<'a> AssignedNames<'a> {
    pub fn from_fields(fields: &'a FieldAssignment) -> Self {
        let dimensions: HashSet<&str> = fields.dimension_columns.iter().collect();
        let measures: HashSet<&str> = fields.measure_columns.iter().collect();

        let in_both = dimensions.intersection(&measures).copied().collect();
        let in_either = dimensions.union(&measures).copied().collect();
        Self { in_either, in_both }
    }

    pub fn in_either(&self, name: &str) -> bool {
        self.in_either.contains(name)
    }

    pub fn in_both(&self, name: &str) -> bool {
        self.in_both.contains(name)
    }
}

/// Classify a single column. Returns `None` when the column may be dragged.
pub fn classify_column(
    column: &Column,
    assigned: &AssignedNames<'_>,
    flags: PolicyFlags,
) -> Option<DisabledReason> {
    if !column.column_type.is_supported() {
        return Some(DisabledReason::UnsupportedType(column.column_type.clone()));
    }
    if !flags.can_select_measure && assigned.in_both(&column.name) {
        return Some(DisabledReason::MeasureLocked);
    }
    if !flags.can_use_field_as_both_dimension_and_measure && assigned.in_either(&column.name) {
        return Some(DisabledReason::AlreadyAssigned);
    }
    None
}

/// Compute the disabled column set for a catalog under the given assignment and policy.
///
/// Only catalog columns are considered; assigned names missing from the catalog are ignored.
pub fn disabled_column_names(
    catalog: &ColumnCatalog,
    fields: &FieldAssignment,
    flags: PolicyFlags,
) -> DisabledColumnSet {
    let assigned = AssignedNames::from_fields(fields);
    let mut disabled = DisabledColumnSet::new();
    for column in catalog {
        if let Some(reason) = classify_column(column, &assigned, flags) {
            disabled.insert(&column.name, reason);
        }
    }
    disabled
}
