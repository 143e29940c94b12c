//! Contract tests for table-mediated writes

use core_types::{Attributes, Identifier};
use static_lookup::{lookup_put, ExecState, ObjectOps, Value};

use crate::fixtures::{sample_table, Sample, LABEL};

#[test]
fn test_read_only_put_is_handled_but_unchanged() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&["only"]);
    let name = Identifier::new("length");

    let handled = lookup_put::<Sample>(
        &mut exec,
        &name,
        &Value::from(42),
        Attributes::empty(),
        sample_table(),
        &sample,
    )
    .unwrap();

    assert!(handled);
    assert_eq!(sample.get(&mut exec, &name).unwrap(), Value::from(1));
    assert!(sample.object_base().get_direct(&name).is_none());
}

#[test]
fn test_writable_put_calls_token_writer_once() {
    let mut exec = ExecState::with_new_realm();
    let sample = Sample::create(&[]);

    let handled = lookup_put::<Sample>(
        &mut exec,
        &Identifier::new("label"),
        &Value::from("fresh"),
        Attributes::empty(),
        sample_table(),
        &sample,
    )
    .unwrap();

    assert!(handled);
    let writes = sample.downcast_ref::<Sample>().unwrap().writes.borrow().clone();
    assert_eq!(writes, vec![(LABEL, Value::from("fresh"))]);
}
