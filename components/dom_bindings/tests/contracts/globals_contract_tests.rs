//! Contract tests for the DOM globals

use std::rc::Rc;

use core_types::{Attributes, Identifier};
use dom_bindings::{install, node_constructor, DomException, NodeType};
use static_lookup::{ExecState, ObjectOps, ObjectRef, Value};

fn global_property(exec: &mut ExecState, name: &str) -> Value {
    let global = exec.global_object_ref();
    global.get(exec, &Identifier::new(name)).unwrap()
}

#[test]
fn test_install_defines_hidden_globals() {
    let mut exec = ExecState::with_new_realm();
    install(&mut exec).unwrap();

    assert!(global_property(&mut exec, "Node").is_object());
    assert!(global_property(&mut exec, "DOMException").is_object());

    let global = exec.global_object_ref();
    assert!(global.property_names().is_empty());
    let stored = global
        .object_base()
        .get_direct_property(&Identifier::new("Node"))
        .unwrap();
    assert_eq!(stored.attributes, Attributes::DONT_ENUM);
}

#[test]
fn test_node_constants() {
    let mut exec = ExecState::with_new_realm();
    install(&mut exec).unwrap();
    let node = global_property(&mut exec, "Node");
    let node = node.as_object().unwrap();

    for node_type in NodeType::ALL {
        let value = node.get(&mut exec, &Identifier::new(node_type.constant_name())).unwrap();
        assert_eq!(value, Value::from(u32::from(node_type.code())));
    }
    assert_eq!(node.get(&mut exec, &Identifier::new("ATTRIBUTE_NODE")).unwrap(), Value::Undefined);
}

#[test]
fn test_constants_are_read_only() {
    let mut exec = ExecState::with_new_realm();
    install(&mut exec).unwrap();
    let node = global_property(&mut exec, "Node");
    let node = node.as_object().unwrap();
    let name = Identifier::new("TEXT_NODE");

    node.put(&mut exec, &name, Value::from(99), Attributes::empty()).unwrap();
    assert_eq!(node.get(&mut exec, &name).unwrap(), Value::from(3));
    assert!(!node.delete_property(&name));
}

#[test]
fn test_exception_constants() {
    let mut exec = ExecState::with_new_realm();
    install(&mut exec).unwrap();
    let constructor = global_property(&mut exec, "DOMException");
    let constructor = constructor.as_object().unwrap();

    for exception in DomException::ALL {
        let value = constructor.get(&mut exec, &Identifier::new(exception.name())).unwrap();
        assert_eq!(value, Value::from(u32::from(exception.code())));
    }
}

#[test]
fn test_node_constructor_is_realm_singleton() {
    let mut exec = ExecState::with_new_realm();
    install(&mut exec).unwrap();

    let installed = global_property(&mut exec, "Node");
    let cached: ObjectRef = node_constructor(&mut exec).unwrap();
    assert_eq!(installed, Value::Object(cached));

    let mut other = ExecState::with_new_realm();
    let elsewhere: ObjectRef = node_constructor(&mut other).unwrap();
    assert_ne!(installed, Value::Object(elsewhere));
}

#[test]
fn test_reinstall_keeps_singletons() {
    let mut exec = ExecState::with_new_realm();
    install(&mut exec).unwrap();
    let first = global_property(&mut exec, "Node");
    install(&mut exec).unwrap();
    let second = global_property(&mut exec, "Node");

    assert_eq!(first, second);
    assert!(Rc::ptr_eq(
        first.as_object().unwrap(),
        second.as_object().unwrap()
    ));
}
