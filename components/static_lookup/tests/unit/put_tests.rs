//! Unit tests for table-mediated writes

use core_types::{Attributes, ErrorKind, Identifier};
use static_lookup::{lookup_put, lookup_put_or_parent, ExecState, ObjectOps, Value};

use crate::fixtures::{sample_table, Sample, Special, Toolbox, LABEL};

fn writes(object: &static_lookup::ObjectRef) -> Vec<(i32, Value)> {
    object.downcast_ref::<Sample>().unwrap().writes.borrow().clone()
}

#[test]
fn test_miss_is_not_handled() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);

    let handled = lookup_put::<Sample>(
        &mut exec,
        &Identifier::new("unknown"),
        &Value::from(1),
        Attributes::empty(),
        sample_table(),
        &sample,
    )
    .unwrap();
    assert!(!handled);
    assert_eq!(sample.object_base().direct_len(), 0);
}

#[test]
fn test_writable_value_goes_to_token_writer() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);

    let handled = lookup_put::<Sample>(
        &mut exec,
        &Identifier::new("label"),
        &Value::from("renamed"),
        Attributes::empty(),
        sample_table(),
        &sample,
    )
    .unwrap();
    assert!(handled);
    assert_eq!(writes(&sample), vec![(LABEL, Value::from("renamed"))]);
    assert_eq!(sample.get(&mut exec, &Identifier::new("label")).unwrap(), Value::from("renamed"));
}

#[test]
fn test_read_only_value_is_ignored() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&["a"]);

    let handled = lookup_put::<Sample>(
        &mut exec,
        &Identifier::new("length"),
        &Value::from(10),
        Attributes::empty(),
        sample_table(),
        &sample,
    )
    .unwrap();
    assert!(handled);
    assert!(writes(&sample).is_empty());
    assert_eq!(sample.get(&mut exec, &Identifier::new("length")).unwrap(), Value::from(1));
}

#[test]
fn test_method_write_overrides_per_instance() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);
    let other = Sample::create(&[]);
    let name = Identifier::new("slice");

    let handled = lookup_put::<Sample>(
        &mut exec,
        &name,
        &Value::from("not a method"),
        Attributes::empty(),
        sample_table(),
        &sample,
    )
    .unwrap();
    assert!(handled);
    assert!(writes(&sample).is_empty());
    assert_eq!(sample.get(&mut exec, &name).unwrap(), Value::from("not a method"));
    assert_eq!(other.get(&mut exec, &name).unwrap().type_of(), "function");
}

#[test]
fn test_put_or_parent_delegates_only_on_miss() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);

    let mut delegated = Vec::new();
    for name in ["label", "length", "elsewhere"] {
        lookup_put_or_parent::<Sample, _>(
            &mut exec,
            &Identifier::new(name),
            Value::from(1),
            Attributes::empty(),
            sample_table(),
            &sample,
            |_, value| {
                delegated.push((name, value));
                Ok(())
            },
        )
        .unwrap();
    }
    assert_eq!(delegated, vec![("elsewhere", Value::from(1))]);
}

#[test]
fn test_token_writer_errors_propagate() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);

    // `hidden` is writable in the table but the host refuses it
    let error = lookup_put::<Sample>(
        &mut exec,
        &Identifier::new("hidden"),
        &Value::from(false),
        Attributes::empty(),
        sample_table(),
        &sample,
    )
    .unwrap_err();
    assert_eq!(error.kind, ErrorKind::InternalError);
}

#[test]
fn test_put_walks_class_chain() {
    let mut exec = ExecState::with_new_realm();
    let special = Special::create(&[]);

    special
        .put(&mut exec, &Identifier::new("season"), Value::from("autumn"), Attributes::empty())
        .unwrap();
    special
        .put(&mut exec, &Identifier::new("label"), Value::from("chained"), Attributes::empty())
        .unwrap();
    special
        .put(&mut exec, &Identifier::new("flavor"), Value::from("mint"), Attributes::empty())
        .unwrap();

    assert_eq!(special.get(&mut exec, &Identifier::new("season")).unwrap(), Value::from("autumn"));
    assert_eq!(special.get(&mut exec, &Identifier::new("label")).unwrap(), Value::from("chained"));
    assert_eq!(special.get(&mut exec, &Identifier::new("flavor")).unwrap(), Value::from("vanilla"));
    assert_eq!(special.object_base().direct_len(), 0);
}

#[test]
fn test_function_only_class_writes_generically() {
    let mut exec = ExecState::with_new_realm();
    let toolbox = Toolbox::create();
    let name = Identifier::new("describe");

    toolbox.put(&mut exec, &name, Value::from(3), Attributes::empty()).unwrap();
    assert_eq!(toolbox.get(&mut exec, &name).unwrap(), Value::from(3));
}
