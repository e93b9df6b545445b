//! Memoized disabled column set.
//!
//! [`DisabledColumnsCache`] is owned by one editor instance. Its owner calls
//! [`DisabledColumnsCache::update`] with every new snapshot of inputs before reading the set.
//! The update runs synchronously: once it returns, [`DisabledColumnsCache::disabled`] reflects
//! the snapshot just delivered.
//!
//! Change detection is shallow. Catalog and field lists are compared by identity, flags by
//! value. Any change recomputes the whole set; when nothing changed the previous
//! `Arc<DisabledColumnSet>` is kept so readers can skip work on pointer equality.

use crate::classify::{disabled_column_names, DisabledColumnSet};
use crate::drag::DragRejected;
use crate::inputs::AggregateInputs;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheState {
    /// Inputs changed (or none were seen yet); the set must be recomputed.
    Stale,
    /// The set matches the last inputs seen.
    Fresh,
}

/// Which tracked inputs differ between two snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputChanges {
    pub catalog: bool,
    pub dimension_columns: bool,
    pub measure_columns: bool,
    pub can_select_measure: bool,
    pub can_use_field_as_both_dimension_and_measure: bool,
}

impl InputChanges {
    pub fn between(prev: &AggregateInputs, next: &AggregateInputs) -> Self {
        Self {
            catalog: !prev.catalog.same_as(&next.catalog),
            dimension_columns: !prev
                .fields
                .dimension_columns
                .same_as(&next.fields.dimension_columns),
            measure_columns: !prev
                .fields
                .measure_columns
                .same_as(&next.fields.measure_columns),
            can_select_measure: prev.flags.can_select_measure != next.flags.can_select_measure,
            can_use_field_as_both_dimension_and_measure: prev
                .flags
                .can_use_field_as_both_dimension_and_measure
                != next.flags.can_use_field_as_both_dimension_and_measure,
        }
    }

    pub fn all() -> Self {
        Self {
            catalog: true,
            dimension_columns: true,
            measure_columns: true,
            can_select_measure: true,
            can_use_field_as_both_dimension_and_measure: true,
        }
    }

    pub fn any(&self) -> bool {
        self.catalog
            || self.dimension_columns
            || self.measure_columns
            || self.can_select_measure
            || self.can_use_field_as_both_dimension_and_measure
    }

    fn labels(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.catalog, "catalog"),
            (self.dimension_columns, "dimensionColumns"),
            (self.measure_columns, "measureColumns"),
            (self.can_select_measure, "canSelectMeasure"),
            (
                self.can_use_field_as_both_dimension_and_measure,
                "canUseFieldAsBothDimensionAndMeasure",
            ),
        ]
        .into_iter()
        .filter_map(|(changed, label)| changed.then_some(label))
    }
}

impl fmt::Display for InputChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for label in self.labels() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(label)?;
            first = false;
        }
        if first {
            f.write_str("(none)")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct DisabledColumnsCache {
    inputs: Option<AggregateInputs>,
    disabled: Arc<DisabledColumnSet>,
    state: CacheState,
    recomputes: u64,
}

impl Default for DisabledColumnsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DisabledColumnsCache {
    /// An empty cache. The first [`update`](Self::update) always computes.
    pub fn new() -> Self {
        Self {
            inputs: None,
            disabled: Arc::new(DisabledColumnSet::new()),
            state: CacheState::Stale,
            recomputes: 0,
        }
    }

    pub fn with_inputs(inputs: AggregateInputs) -> Self {
        let mut cache = Self::new();
        cache.update(inputs);
        cache
    }

    /// Deliver a new snapshot of inputs. Returns `true` when the set was recomputed.
    pub fn update(&mut self, next: AggregateInputs) -> bool {
        let changes = match &self.inputs {
            Some(prev) => InputChanges::between(prev, &next),
            None => InputChanges::all(),
        };
        if changes.any() {
            self.state = CacheState::Stale;
        }

        let recomputed = match self.state {
            CacheState::Stale => {
                let disabled = disabled_column_names(&next.catalog, &next.fields, next.flags);
                log::debug!(
                    "recomputed disabled columns ({} of {} disabled); changed inputs: {changes}",
                    disabled.len(),
                    next.catalog.len(),
                );
                self.disabled = Arc::new(disabled);
                self.recomputes += 1;
                self.state = CacheState::Fresh;
                true
            }
            CacheState::Fresh => {
                log::trace!("disabled columns unchanged; reusing cached set");
                false
            }
        };
        self.inputs = Some(next);
        recomputed
    }

    pub fn disabled(&self) -> &Arc<DisabledColumnSet> {
        &self.disabled
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }

    pub fn inputs(&self) -> Option<&AggregateInputs> {
        self.inputs.as_ref()
    }

    pub fn state(&self) -> CacheState {
        self.state
    }

    /// Number of times the set has been computed since construction.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Whether `name` may be picked up from the column menu under the current inputs.
    pub fn check_drag(&self, name: &str) -> Result<(), DragRejected> {
        let known = self
            .inputs
            .as_ref()
            .is_some_and(|inputs| inputs.catalog.contains(name));
        if !known {
            return Err(DragRejected::UnknownColumn(name.to_string()));
        }
        match self.disabled.reason(name) {
            Some(reason) => Err(DragRejected::Disabled {
                column: name.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}
