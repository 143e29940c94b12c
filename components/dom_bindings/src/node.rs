//! Script wrappers for tree nodes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use core_types::{Attributes, JsError, JsResult};
use static_lookup::{
    cache_global_object, native_function_factory, static_hash_table, ClassInfo, ExecState,
    GlobalSingleton, JsObject, ObjectBase, ObjectRef, PropertySpec, PrototypeDefinition,
    StaticFunctionResolver, StaticValueResolver, Value, ValueProperties,
};

use crate::element::Element;
use crate::node_impl::{NodeHandle, NodeImpl, NodeType};

const NODE_NAME: i32 = 0;
const NODE_VALUE: i32 = 1;
const NODE_TYPE: i32 = 2;
const PARENT_NODE: i32 = 3;
const FIRST_CHILD: i32 = 4;
const LAST_CHILD: i32 = 5;
const CHILD_COUNT: i32 = 6;
const TEXT_CONTENT: i32 = 7;

const FIXED: Attributes = Attributes::DONT_DELETE.union(Attributes::READ_ONLY);

static_hash_table! {
    fn node_table = [
        PropertySpec::value("nodeName", NODE_NAME, FIXED),
        PropertySpec::value("nodeValue", NODE_VALUE, Attributes::DONT_DELETE),
        PropertySpec::value("nodeType", NODE_TYPE, FIXED),
        PropertySpec::value("parentNode", PARENT_NODE, FIXED),
        PropertySpec::value("firstChild", FIRST_CHILD, FIXED),
        PropertySpec::value("lastChild", LAST_CHILD, FIXED),
        PropertySpec::value("childCount", CHILD_COUNT, FIXED),
        PropertySpec::value("textContent", TEXT_CONTENT, Attributes::DONT_DELETE),
    ]
}

static NODE_RESOLVER: StaticValueResolver<Node> = StaticValueResolver::new(node_table);

/// Class metadata of node wrappers.
pub static NODE_INFO: ClassInfo = ClassInfo {
    class_name: "Node",
    parent: None,
    resolver: Some(&NODE_RESOLVER),
};

/// Script wrapper around a [`NodeImpl`].
#[derive(Debug)]
pub struct Node {
    base: ObjectBase,
    node: NodeHandle,
}

impl Node {
    pub(crate) fn new(exec: &mut ExecState, node: NodeHandle) -> Self {
        Self::with_prototype(NODE_PROTOTYPE.get(exec), node)
    }

    pub(crate) fn with_prototype(prototype: ObjectRef, node: NodeHandle) -> Self {
        Node {
            base: ObjectBase::with_prototype(Some(prototype)),
            node,
        }
    }

    /// The wrapped node.
    pub fn node(&self) -> &NodeHandle {
        &self.node
    }
}

impl JsObject for Node {
    fn class_info(&self) -> &'static ClassInfo {
        &NODE_INFO
    }

    fn object_base(&self) -> &ObjectBase {
        &self.base
    }
}

fn node_or_null(exec: &mut ExecState, node: Option<NodeHandle>) -> Value {
    match node {
        Some(node) => Value::Object(to_js(exec, &node)),
        None => Value::Null,
    }
}

fn string_or_null_arg(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Undefined => None,
        other => Some(other.to_string()),
    }
}

impl ValueProperties for Node {
    fn get_value_property(&self, exec: &mut ExecState, token: i32) -> JsResult<Value> {
        let node = &self.node;
        let value = match token {
            NODE_NAME => Value::from(node.node_name()),
            NODE_VALUE => Value::string_or_null(node.node_value().as_deref()),
            NODE_TYPE => Value::from(u32::from(node.node_type().code())),
            PARENT_NODE => node_or_null(exec, node.parent()),
            FIRST_CHILD => node_or_null(exec, node.first_child()),
            LAST_CHILD => node_or_null(exec, node.last_child()),
            CHILD_COUNT => Value::from(node.child_count() as u32),
            TEXT_CONTENT => Value::string_or_null(node.text_content().as_deref()),
            _ => Value::Undefined,
        };
        Ok(value)
    }

    fn put_value_property(
        &self,
        _exec: &mut ExecState,
        token: i32,
        value: Value,
        _attributes: Attributes,
    ) -> JsResult<()> {
        match token {
            NODE_VALUE => self.node.set_node_value(Some(value.to_string())),
            TEXT_CONTENT => self.node.set_text_content(string_or_null_arg(&value)),
            _ => {}
        }
        Ok(())
    }
}

/// Per-realm map from tree nodes to their live wrappers.
///
/// Keeps wrapper identity stable: the same node read twice through
/// `parentNode` or `firstChild` yields the same object, as long as some
/// script value still holds it.
#[derive(Debug, Default)]
pub struct WrapperCache {
    base: ObjectBase,
    wrappers: RefCell<HashMap<*const NodeImpl, Weak<dyn JsObject>>>,
}

static WRAPPER_CACHE_INFO: ClassInfo = ClassInfo {
    class_name: "WrapperCache",
    parent: None,
    resolver: None,
};

impl JsObject for WrapperCache {
    fn class_info(&self) -> &'static ClassInfo {
        &WRAPPER_CACHE_INFO
    }

    fn object_base(&self) -> &ObjectBase {
        &self.base
    }
}

impl GlobalSingleton for WrapperCache {
    fn construct(_exec: &mut ExecState) -> Self {
        WrapperCache::default()
    }
}

impl WrapperCache {
    fn lookup(&self, node: &NodeHandle) -> Option<ObjectRef> {
        self.wrappers.borrow().get(&Rc::as_ptr(node))?.upgrade()
    }

    fn insert(&self, node: &NodeHandle, wrapper: &ObjectRef) {
        let mut wrappers = self.wrappers.borrow_mut();
        wrappers.retain(|_, wrapper| wrapper.strong_count() > 0);
        wrappers.insert(Rc::as_ptr(node), Rc::downgrade(wrapper));
    }

    /// Number of wrappers currently alive.
    pub fn live_count(&self) -> usize {
        self.wrappers
            .borrow()
            .values()
            .filter(|wrapper| wrapper.strong_count() > 0)
            .count()
    }
}

const WRAPPER_CACHE_KEY: &str = "DomWrapperCache";

/// The realm's wrapper cache.
pub fn wrapper_cache(exec: &mut ExecState) -> JsResult<Rc<WrapperCache>> {
    cache_global_object::<WrapperCache>(exec, WRAPPER_CACHE_KEY)
}

/// The script wrapper for `node`: an `Element` for element nodes, a `Node`
/// otherwise. Repeated calls return the same wrapper while it is alive.
pub fn to_js(exec: &mut ExecState, node: &NodeHandle) -> ObjectRef {
    let cache = match wrapper_cache(exec) {
        Ok(cache) => Some(cache),
        Err(error) => {
            log::warn!("wrapper cache unavailable: {}", error);
            None
        }
    };
    if let Some(existing) = cache.as_ref().and_then(|cache| cache.lookup(node)) {
        return existing;
    }

    log::debug!("wrapping {} node {}", node.node_type().code(), node.node_name());
    let wrapper: ObjectRef = match node.node_type() {
        NodeType::Element => Rc::new(Element::new(exec, node.clone())),
        _ => Rc::new(Node::new(exec, node.clone())),
    };
    if let Some(cache) = cache {
        cache.insert(node, &wrapper);
    }
    wrapper
}

/// The node behind a script value, if it wraps one.
pub fn to_node(value: &Value) -> Option<NodeHandle> {
    value
        .as_object()?
        .downcast_ref::<Node>()
        .map(|wrapper| wrapper.node().clone())
}

fn this_node(this: &ObjectRef) -> JsResult<NodeHandle> {
    if !this.class_info().inherits(&NODE_INFO) {
        return Err(JsError::type_error(format!(
            "{} is not a Node",
            this.class_info().class_name
        )));
    }
    this.downcast_ref::<Node>()
        .map(|wrapper| wrapper.node().clone())
        .ok_or_else(|| JsError::internal("Node class without a Node wrapper"))
}

fn node_argument(args: &[Value]) -> JsResult<(Value, NodeHandle)> {
    let argument = args.first().cloned().unwrap_or_default();
    match to_node(&argument) {
        Some(node) => Ok((argument, node)),
        None => Err(JsError::type_error(format!("{} is not a Node", argument))),
    }
}

fn append_child(_exec: &mut ExecState, this: &ObjectRef, args: &[Value]) -> JsResult<Value> {
    let node = this_node(this)?;
    let (argument, child) = node_argument(args)?;
    node.append_child(&child)?;
    Ok(argument)
}

fn remove_child(_exec: &mut ExecState, this: &ObjectRef, args: &[Value]) -> JsResult<Value> {
    let node = this_node(this)?;
    let (argument, child) = node_argument(args)?;
    node.remove_child(&child)?;
    Ok(argument)
}

fn has_child_nodes(_exec: &mut ExecState, this: &ObjectRef, _args: &[Value]) -> JsResult<Value> {
    Ok(Value::from(this_node(this)?.has_child_nodes()))
}

native_function_factory!(fn append_child_factory => append_child);
native_function_factory!(fn remove_child_factory => remove_child);
native_function_factory!(fn has_child_nodes_factory => has_child_nodes);

static_hash_table! {
    fn node_prototype_table = [
        PropertySpec::function("appendChild", append_child_factory, 1, Attributes::DONT_DELETE),
        PropertySpec::function("removeChild", remove_child_factory, 1, Attributes::DONT_DELETE),
        PropertySpec::function("hasChildNodes", has_child_nodes_factory, 0, Attributes::DONT_DELETE),
    ]
}

static NODE_PROTOTYPE_RESOLVER: StaticFunctionResolver = StaticFunctionResolver::new(node_prototype_table);

static NODE_PROTOTYPE_INFO: ClassInfo = ClassInfo {
    class_name: "NodePrototype",
    parent: None,
    resolver: Some(&NODE_PROTOTYPE_RESOLVER),
};

/// Prototype of every node wrapper.
pub static NODE_PROTOTYPE: PrototypeDefinition = PrototypeDefinition {
    key: "NodePrototype",
    class_info: &NODE_PROTOTYPE_INFO,
    parent: None,
};
