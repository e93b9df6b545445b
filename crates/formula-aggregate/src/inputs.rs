use crate::column::ColumnCatalog;
use crate::fields::{FieldAssignment, FieldList};
use crate::policy::PolicyFlags;

/// Snapshot of every input the disabled column set is derived from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateInputs {
    pub catalog: ColumnCatalog,
    pub fields: FieldAssignment,
    pub flags: PolicyFlags,
}

impl AggregateInputs {
    pub fn new(catalog: ColumnCatalog, fields: FieldAssignment, flags: PolicyFlags) -> Self {
        Self {
            catalog,
            fields,
            flags,
        }
    }

    /// Adopt the previous snapshot's instances for every input whose contents are unchanged.
    ///
    /// Snapshots decoded from an external source never share identity with the previous one.
    /// Running them through `reusing` first keeps [`crate::DisabledColumnsCache`] from
    /// recomputing when nothing actually changed.
    pub fn reusing(self, prev: &AggregateInputs) -> Self {
        let catalog = if self.catalog == prev.catalog {
            prev.catalog.clone()
        } else {
            self.catalog
        };
        let dimension_columns = share(self.fields.dimension_columns, &prev.fields.dimension_columns);
        let measure_columns = share(self.fields.measure_columns, &prev.fields.measure_columns);

        Self {
            catalog,
            fields: FieldAssignment::new(dimension_columns, measure_columns),
            flags: self.flags,
        }
    }
}

fn share(next: FieldList, prev: &FieldList) -> FieldList {
    if next == *prev {
        prev.clone()
    } else {
        next
    }
}
