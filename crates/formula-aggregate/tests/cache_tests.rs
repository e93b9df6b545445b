use formula_aggregate::{
    AggregateInputs, CacheState, Column, ColumnCatalog, DisabledColumnsCache, DisabledReason,
    DragRejected, FieldAssignment, FieldList, PolicyFlags,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn sample_inputs() -> AggregateInputs {
    AggregateInputs::new(
        ColumnCatalog::new([
            Column::new("region", "VARCHAR"),
            Column::new("amount", "DOUBLE"),
            Column::new("tags", "LIST"),
        ]),
        FieldAssignment::new(FieldList::new(["region"]), FieldList::new(["amount"])),
        PolicyFlags::new(true, false),
    )
}

#[test]
fn construction_computes_immediately() {
    let cache = DisabledColumnsCache::with_inputs(sample_inputs());

    assert_eq!(cache.state(), CacheState::Fresh);
    assert_eq!(cache.recompute_count(), 1);
    assert_eq!(
        cache.disabled().names().collect::<Vec<_>>(),
        vec!["amount", "region", "tags"]
    );
}

#[test]
fn unchanged_inputs_keep_the_same_set_instance() {
    let inputs = sample_inputs();
    let mut cache = DisabledColumnsCache::with_inputs(inputs.clone());
    let before = Arc::clone(cache.disabled());

    // Same instances, as when an unrelated property of the owner changes.
    assert!(!cache.update(inputs.clone()));
    assert!(!cache.update(inputs));

    assert!(Arc::ptr_eq(&before, cache.disabled()));
    assert_eq!(cache.recompute_count(), 1);
    assert_eq!(cache.state(), CacheState::Fresh);
}

#[test]
fn rebuilt_but_equal_catalog_counts_as_changed() {
    let inputs = sample_inputs();
    let mut cache = DisabledColumnsCache::with_inputs(inputs.clone());
    let before = Arc::clone(cache.disabled());

    let mut next = inputs;
    next.catalog = ColumnCatalog::new(next.catalog.iter().cloned());

    assert!(cache.update(next));
    assert_eq!(cache.recompute_count(), 2);
    assert!(!Arc::ptr_eq(&before, cache.disabled()));
    assert_eq!(*before, **cache.disabled());
}

#[test]
fn each_tracked_input_triggers_recompute() {
    let base = sample_inputs();
    let mut cache = DisabledColumnsCache::with_inputs(base.clone());

    let mut next = base.clone();
    next.fields.dimension_columns = FieldList::default();
    assert!(cache.update(next.clone()));
    assert!(!cache.is_disabled("region"));

    next.fields.measure_columns = FieldList::default();
    assert!(cache.update(next.clone()));
    assert!(!cache.is_disabled("amount"));

    next.flags.can_use_field_as_both_dimension_and_measure = true;
    assert!(cache.update(next.clone()));

    next.flags.can_select_measure = false;
    assert!(cache.update(next.clone()));

    next.catalog = ColumnCatalog::default();
    assert!(cache.update(next));
    assert!(cache.disabled().is_empty());

    assert_eq!(cache.recompute_count(), 6);
}

#[test]
fn reusing_restores_identity_for_equal_inputs() {
    let prev = sample_inputs();
    let mut cache = DisabledColumnsCache::with_inputs(prev.clone());

    let decoded = AggregateInputs::new(
        ColumnCatalog::new(prev.catalog.iter().cloned()),
        FieldAssignment::new(FieldList::new(["region"]), FieldList::new(["amount"])),
        prev.flags,
    );
    let shared = decoded.reusing(&prev);

    assert!(shared.catalog.same_as(&prev.catalog));
    assert!(shared.fields.dimension_columns.same_as(&prev.fields.dimension_columns));
    assert!(!cache.update(shared));
}

#[test]
fn reusing_keeps_changed_lists_fresh() {
    let prev = sample_inputs();
    let next = AggregateInputs::new(
        ColumnCatalog::new(prev.catalog.iter().cloned()),
        FieldAssignment::new(FieldList::new(["region"]), FieldList::new(["region"])),
        prev.flags,
    )
    .reusing(&prev);

    assert!(next.catalog.same_as(&prev.catalog));
    assert!(next.fields.dimension_columns.same_as(&prev.fields.dimension_columns));
    assert!(!next.fields.measure_columns.same_as(&prev.fields.measure_columns));
}

#[test]
fn check_drag_reports_reason() {
    let cache = DisabledColumnsCache::with_inputs(sample_inputs());

    assert_eq!(
        cache.check_drag("region"),
        Err(DragRejected::Disabled {
            column: "region".to_string(),
            reason: DisabledReason::AlreadyAssigned,
        })
    );
    assert_eq!(
        cache.check_drag("nope"),
        Err(DragRejected::UnknownColumn("nope".to_string()))
    );

    let mut inputs = sample_inputs();
    inputs.fields = FieldAssignment::default();
    let cache = DisabledColumnsCache::with_inputs(inputs);
    assert_eq!(cache.check_drag("region"), Ok(()));
}

#[test]
fn drag_rejection_messages() {
    let err = DragRejected::Disabled {
        column: "tags".to_string(),
        reason: DisabledReason::UnsupportedType("LIST".into()),
    };
    assert_eq!(
        err.to_string(),
        "column tags is disabled: columns of type LIST are not supported"
    );
}
