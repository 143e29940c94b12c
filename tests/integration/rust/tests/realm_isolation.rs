//! Realm isolation across components
//!
//! Every realm gets its own prototypes, constructor objects, and wrapper
//! cache, while the static tables behind them are shared.

use std::rc::Rc;

use dom_bindings::{install, to_js, NodeImpl, NODE_PROTOTYPE};
use integration_tests::{get, invoke};
use static_lookup::{ExecState, Value};

#[test]
fn test_prototypes_are_per_realm() {
    let mut realm_a = ExecState::with_new_realm();
    let mut realm_b = ExecState::with_new_realm();

    let a = NODE_PROTOTYPE.get(&mut realm_a);
    let b = NODE_PROTOTYPE.get(&mut realm_b);
    assert!(!Rc::ptr_eq(&a, &b));
}

#[test]
fn test_method_wrappers_are_per_realm() {
    let mut realm_a = ExecState::with_new_realm();
    let mut realm_b = ExecState::with_new_realm();
    let node = NodeImpl::element("div");

    let in_a = to_js(&mut realm_a, &node);
    let in_b = to_js(&mut realm_b, &node);
    let method_a = get(&mut realm_a, &in_a, "appendChild").unwrap();
    let method_b = get(&mut realm_b, &in_b, "appendChild").unwrap();
    assert_ne!(method_a, method_b);
}

#[test]
fn test_tree_changes_visible_from_every_realm() {
    let mut realm_a = ExecState::with_new_realm();
    let mut realm_b = ExecState::with_new_realm();
    let node = NodeImpl::element("div");

    let in_a = to_js(&mut realm_a, &node);
    let in_b = to_js(&mut realm_b, &node);
    let child = to_js(&mut realm_a, &NodeImpl::text("shared"));
    invoke(&mut realm_a, &in_a, "appendChild", &[Value::Object(child)]).unwrap();

    assert_eq!(get(&mut realm_b, &in_b, "textContent").unwrap(), Value::from("shared"));
}

#[test]
fn test_globals_installed_per_realm() {
    let mut realm_a = ExecState::with_new_realm();
    let mut realm_b = ExecState::with_new_realm();
    install(&mut realm_a).unwrap();

    let global_a = realm_a.global_object_ref();
    let global_b = realm_b.global_object_ref();
    assert!(get(&mut realm_a, &global_a, "Node").unwrap().is_object());
    assert_eq!(get(&mut realm_b, &global_b, "Node").unwrap(), Value::Undefined);
}
