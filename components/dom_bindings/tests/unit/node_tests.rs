//! Unit tests for Node wrappers

use core_types::{Attributes, ErrorKind, Identifier};
use dom_bindings::{to_js, NodeImpl};
use static_lookup::{call_function, ExecState, ObjectOps, ObjectRef, Value};

fn get(exec: &mut ExecState, object: &ObjectRef, name: &str) -> Value {
    object.get(exec, &Identifier::new(name)).unwrap()
}

fn call(exec: &mut ExecState, object: &ObjectRef, method: &str, args: &[Value]) -> static_lookup::JsResult<Value> {
    let function = get(exec, object, method);
    call_function(exec, &function, object, args)
}

#[test]
fn test_text_node_properties() {
    let mut exec = ExecState::with_new_realm();
    let text = to_js(&mut exec, &NodeImpl::text("hello"));

    assert_eq!(get(&mut exec, &text, "nodeName"), Value::from("#text"));
    assert_eq!(get(&mut exec, &text, "nodeType"), Value::from(3));
    assert_eq!(get(&mut exec, &text, "nodeValue"), Value::from("hello"));
    assert_eq!(get(&mut exec, &text, "textContent"), Value::from("hello"));
    assert_eq!(get(&mut exec, &text, "childCount"), Value::from(0));
    assert_eq!(get(&mut exec, &text, "parentNode"), Value::Null);
    assert_eq!(text.class_name(), "Node");
}

#[test]
fn test_write_node_value() {
    let mut exec = ExecState::with_new_realm();
    let node = NodeImpl::comment("before");
    let wrapper = to_js(&mut exec, &node);

    wrapper
        .put(&mut exec, &Identifier::new("nodeValue"), Value::from("after"), Attributes::empty())
        .unwrap();
    assert_eq!(node.node_value().as_deref(), Some("after"));
    assert_eq!(wrapper.object_base().direct_len(), 0);
}

#[test]
fn test_read_only_node_properties_ignore_writes() {
    let mut exec = ExecState::with_new_realm();
    let wrapper = to_js(&mut exec, &NodeImpl::text("x"));

    wrapper
        .put(&mut exec, &Identifier::new("nodeType"), Value::from(1), Attributes::empty())
        .unwrap();
    assert_eq!(get(&mut exec, &wrapper, "nodeType"), Value::from(3));
}

#[test]
fn test_node_properties_cannot_be_deleted() {
    let mut exec = ExecState::with_new_realm();
    let wrapper = to_js(&mut exec, &NodeImpl::text("x"));
    assert!(!wrapper.delete_property(&Identifier::new("nodeValue")));
}

#[test]
fn test_append_and_remove_child() {
    let mut exec = ExecState::with_new_realm();
    let parent_node = NodeImpl::element("ul");
    let parent = to_js(&mut exec, &parent_node);
    let child = to_js(&mut exec, &NodeImpl::element("li"));

    let returned = call(&mut exec, &parent, "appendChild", &[Value::Object(child.clone())]).unwrap();
    assert_eq!(returned, Value::Object(child.clone()));
    assert_eq!(get(&mut exec, &parent, "childCount"), Value::from(1));
    assert_eq!(call(&mut exec, &parent, "hasChildNodes", &[]).unwrap(), Value::from(true));
    assert_eq!(get(&mut exec, &child, "parentNode"), Value::Object(parent.clone()));
    assert_eq!(get(&mut exec, &parent, "firstChild"), Value::Object(child.clone()));

    call(&mut exec, &parent, "removeChild", &[Value::Object(child.clone())]).unwrap();
    assert_eq!(parent_node.child_count(), 0);
    assert_eq!(get(&mut exec, &parent, "lastChild"), Value::Null);
}

#[test]
fn test_hierarchy_error() {
    let mut exec = ExecState::with_new_realm();
    let text = to_js(&mut exec, &NodeImpl::text("leaf"));
    let child = to_js(&mut exec, &NodeImpl::element("b"));

    let error = call(&mut exec, &text, "appendChild", &[Value::Object(child)]).unwrap_err();
    assert_eq!(error.kind, ErrorKind::DomException(3));
}

#[test]
fn test_remove_missing_child_is_not_found() {
    let mut exec = ExecState::with_new_realm();
    let parent = to_js(&mut exec, &NodeImpl::element("div"));
    let stranger = to_js(&mut exec, &NodeImpl::text("x"));

    let error = call(&mut exec, &parent, "removeChild", &[Value::Object(stranger)]).unwrap_err();
    assert_eq!(error.kind, ErrorKind::DomException(8));
}

#[test]
fn test_append_non_node_is_type_error() {
    let mut exec = ExecState::with_new_realm();
    let parent = to_js(&mut exec, &NodeImpl::element("div"));

    let error = call(&mut exec, &parent, "appendChild", &[Value::from(5)]).unwrap_err();
    assert_eq!(error.kind, ErrorKind::TypeError);
    let error = call(&mut exec, &parent, "appendChild", &[]).unwrap_err();
    assert_eq!(error.kind, ErrorKind::TypeError);
}

#[test]
fn test_method_on_foreign_this_is_type_error() {
    let mut exec = ExecState::with_new_realm();
    let parent = to_js(&mut exec, &NodeImpl::element("div"));
    let method = get(&mut exec, &parent, "hasChildNodes");
    let plain = static_lookup::PlainObject::create(None);

    let error = call_function(&mut exec, &method, &plain, &[]).unwrap_err();
    assert_eq!(error.kind, ErrorKind::TypeError);
}

#[test]
fn test_text_content_write_replaces_children() {
    let mut exec = ExecState::with_new_realm();
    let div = NodeImpl::element("div");
    div.append_child(&NodeImpl::element("span")).unwrap();
    let wrapper = to_js(&mut exec, &div);

    wrapper
        .put(&mut exec, &Identifier::new("textContent"), Value::from("plain"), Attributes::empty())
        .unwrap();
    assert_eq!(div.child_count(), 1);
    assert_eq!(get(&mut exec, &wrapper, "textContent"), Value::from("plain"));

    wrapper
        .put(&mut exec, &Identifier::new("textContent"), Value::Null, Attributes::empty())
        .unwrap();
    assert_eq!(div.child_count(), 0);
}
