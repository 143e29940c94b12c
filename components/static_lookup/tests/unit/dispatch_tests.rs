//! Unit tests for the get-side dispatch helpers

use std::rc::Rc;

use core_types::{ErrorKind, Identifier};
use static_lookup::{
    get_static_function_slot, get_static_property_slot, get_static_value_slot, static_function_getter,
    static_value_getter, ExecState, ObjectOps, PlainObject, PropertySlot, SlotKind, Value,
};

use crate::fixtures::{
    sample_table, special_table, toolbox_table, Sample, Special, Toolbox, LENGTH,
};

#[test]
fn test_value_hit_binds_value_getter() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&["a", "b", "c"]);
    let mut slot = PropertySlot::new();
    let mut parent_calls = 0;

    let found = get_static_property_slot::<Sample, _>(
        &mut exec,
        sample_table(),
        &sample,
        &Identifier::new("length"),
        &mut slot,
        |_, _| {
            parent_calls += 1;
            false
        },
    );

    assert!(found);
    assert_eq!(parent_calls, 0);
    assert_eq!(slot.kind(), SlotKind::StaticValue);
    assert_eq!(slot.static_entry().and_then(|entry| entry.token()), Some(LENGTH));
    let value = slot.get_value(&mut exec, &Identifier::new("length")).unwrap();
    assert_eq!(value, Value::from(3));
}

#[test]
fn test_function_hit_binds_function_getter() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);
    let mut slot = PropertySlot::new();

    let found = get_static_property_slot::<Sample, _>(
        &mut exec,
        sample_table(),
        &sample,
        &Identifier::new("slice"),
        &mut slot,
        |_, _| false,
    );

    assert!(found);
    assert_eq!(slot.kind(), SlotKind::StaticFunction);
    assert!(Rc::ptr_eq(slot.slot_base().unwrap(), &sample));
}

#[test]
fn test_binding_does_not_materialize() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);
    let mut slot = PropertySlot::new();

    get_static_property_slot::<Sample, _>(
        &mut exec,
        sample_table(),
        &sample,
        &Identifier::new("describe"),
        &mut slot,
        |_, _| false,
    );

    assert_eq!(sample.object_base().direct_len(), 0);
}

#[test]
fn test_miss_returns_parent_result() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);
    let fallback = PlainObject::create(None);

    for parent_result in [false, true] {
        let mut slot = PropertySlot::new();
        let mut parent_calls = 0;
        let found = get_static_property_slot::<Sample, _>(
            &mut exec,
            sample_table(),
            &sample,
            &Identifier::new("missing"),
            &mut slot,
            |_, slot| {
                parent_calls += 1;
                if parent_result {
                    slot.set_value(fallback.clone(), Value::from("from parent"));
                }
                parent_result
            },
        );
        assert_eq!(found, parent_result);
        assert_eq!(parent_calls, 1);
        assert_eq!(slot.is_set(), parent_result);
    }
}

#[test]
fn test_function_slot_hit_and_miss() {
    let mut exec = ExecState::with_new_realm();
    let toolbox = Toolbox::create();

    let mut slot = PropertySlot::new();
    assert!(get_static_function_slot(
        &mut exec,
        toolbox_table(),
        &toolbox,
        &Identifier::new("describe"),
        &mut slot,
        |_, _| false,
    ));
    assert_eq!(slot.kind(), SlotKind::StaticFunction);

    let mut slot = PropertySlot::new();
    let mut delegated = false;
    assert!(!get_static_function_slot(
        &mut exec,
        toolbox_table(),
        &toolbox,
        &Identifier::new("length"),
        &mut slot,
        |_, _| {
            delegated = true;
            false
        },
    ));
    assert!(delegated);
}

#[test]
fn test_value_slot_hit_and_miss() {
    let mut exec = ExecState::with_new_realm();
    let special = Special::create(&[]);

    let mut slot = PropertySlot::new();
    assert!(get_static_value_slot::<Special, _>(
        &mut exec,
        special_table(),
        &special,
        &Identifier::new("flavor"),
        &mut slot,
        |_, _| false,
    ));
    assert_eq!(slot.kind(), SlotKind::StaticValue);
    assert_eq!(
        slot.get_value(&mut exec, &Identifier::new("flavor")).unwrap(),
        Value::from("vanilla")
    );

    let mut slot = PropertySlot::new();
    assert!(!get_static_value_slot::<Special, _>(
        &mut exec,
        special_table(),
        &special,
        &Identifier::new("label"),
        &mut slot,
        |_, _| false,
    ));
}

#[test]
fn test_function_getter_memoizes() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);
    let name = Identifier::new("describe");
    let entry = sample_table().find_entry(&name).unwrap();

    let first = static_function_getter(&mut exec, &sample, entry, &name).unwrap();
    let second = static_function_getter(&mut exec, &sample, entry, &name).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.type_of(), "function");

    let cached = sample.object_base().get_direct_property(&name).unwrap();
    assert_eq!(cached.value, first);
    assert!(cached.attributes.is_function());
    assert!(cached.attributes.is_dont_enum());
}

#[test]
fn test_function_getter_is_per_instance() {
    let mut exec = ExecState::with_new_realm();
    let a = Sample::create(&[]);
    let b = Sample::create(&[]);

    let name = Identifier::new("describe");
    let from_a = a.get(&mut exec, &name).unwrap();
    let from_b = b.get(&mut exec, &name).unwrap();
    assert_ne!(from_a, from_b);
}

#[test]
fn test_value_getter_reads_embedded_ancestor() {
    let mut exec = ExecState::with_new_realm();
    let special = Special::create(&["x", "y"]);
    let entry = sample_table().find_entry_str("length").unwrap();

    let value = static_value_getter::<Sample>(&mut exec, &special, entry).unwrap();
    assert_eq!(value, Value::from(2));
}

#[test]
#[cfg(not(debug_assertions))]
fn test_value_getter_wrong_base_is_internal_error() {
    let mut exec = ExecState::with_new_realm();
    let plain = PlainObject::create(None);
    let entry = sample_table().find_entry_str("length").unwrap();

    let error = static_value_getter::<Sample>(&mut exec, &plain, entry).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InternalError);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "value getter")]
fn test_value_getter_wrong_base_asserts() {
    let mut exec = ExecState::with_new_realm();
    let plain = PlainObject::create(None);
    let entry = sample_table().find_entry_str("length").unwrap();

    let _ = static_value_getter::<Sample>(&mut exec, &plain, entry);
}

#[test]
fn test_function_getter_on_value_entry_is_internal_error() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);
    let name = Identifier::new("length");
    let entry = sample_table().find_entry(&name).unwrap();

    let error = static_function_getter(&mut exec, &sample, entry, &name).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InternalError);
}
