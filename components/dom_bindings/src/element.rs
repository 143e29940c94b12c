//! Element wrappers.
//!
//! An [`Element`] embeds a [`Node`]; its class resolves element properties
//! first and hands every other name to the node class, whose value getters
//! still see the embedded `Node`.

use std::any::{Any, TypeId};

use core_types::{Attributes, JsError, JsResult};
use static_lookup::{
    native_function_factory, static_hash_table, ClassInfo, ExecState, JsObject, ObjectBase,
    ObjectRef, PropertySpec, PrototypeDefinition, StaticFunctionResolver, StaticValueResolver,
    Value, ValueProperties,
};

use crate::node::{Node, NODE_INFO, NODE_PROTOTYPE};
use crate::node_impl::{NodeHandle, NodeType};

const TAG_NAME: i32 = 0;
const ID: i32 = 1;
const CLASS_NAME: i32 = 2;

static_hash_table! {
    fn element_table = [
        PropertySpec::value("tagName", TAG_NAME, Attributes::DONT_DELETE.union(Attributes::READ_ONLY)),
        PropertySpec::value("id", ID, Attributes::DONT_DELETE),
        PropertySpec::value("className", CLASS_NAME, Attributes::DONT_DELETE),
    ]
}

static ELEMENT_RESOLVER: StaticValueResolver<Element> = StaticValueResolver::new(element_table);

/// Class metadata of element wrappers.
pub static ELEMENT_INFO: ClassInfo = ClassInfo {
    class_name: "Element",
    parent: Some(&NODE_INFO),
    resolver: Some(&ELEMENT_RESOLVER),
};

/// Script wrapper around an element node.
#[derive(Debug)]
pub struct Element {
    node: Node,
}

impl Element {
    pub(crate) fn new(exec: &mut ExecState, node: NodeHandle) -> Self {
        Element {
            node: Node::with_prototype(ELEMENT_PROTOTYPE.get(exec), node),
        }
    }

    /// The wrapped element node.
    pub fn node(&self) -> &NodeHandle {
        self.node.node()
    }
}

impl JsObject for Element {
    fn class_info(&self) -> &'static ClassInfo {
        &ELEMENT_INFO
    }

    fn object_base(&self) -> &ObjectBase {
        self.node.object_base()
    }

    fn as_ancestor(&self, type_id: TypeId) -> Option<&dyn Any> {
        if type_id == TypeId::of::<Node>() {
            Some(&self.node)
        } else {
            None
        }
    }
}

impl ValueProperties for Element {
    fn get_value_property(&self, _exec: &mut ExecState, token: i32) -> JsResult<Value> {
        let node = self.node();
        let value = match token {
            TAG_NAME => Value::from(node.node_name()),
            ID => Value::from(node.get_attribute("id").unwrap_or_default()),
            CLASS_NAME => Value::from(node.get_attribute("class").unwrap_or_default()),
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
        let node = self.node();
        match token {
            ID => node.set_attribute("id", &value.to_string())?,
            CLASS_NAME => node.set_attribute("class", &value.to_string())?,
            _ => {}
        }
        Ok(())
    }
}

fn this_element(this: &ObjectRef) -> JsResult<NodeHandle> {
    this.downcast_ref::<Element>()
        .map(|element| element.node().clone())
        .filter(|node| node.node_type() == NodeType::Element)
        .ok_or_else(|| {
            JsError::type_error(format!("{} is not an Element", this.class_info().class_name))
        })
}

fn string_argument(args: &[Value], index: usize) -> String {
    args.get(index).cloned().unwrap_or_default().to_string()
}

fn get_attribute(_exec: &mut ExecState, this: &ObjectRef, args: &[Value]) -> JsResult<Value> {
    let element = this_element(this)?;
    let value = element.get_attribute(&string_argument(args, 0));
    Ok(Value::string_or_null(value.as_deref()))
}

fn set_attribute(_exec: &mut ExecState, this: &ObjectRef, args: &[Value]) -> JsResult<Value> {
    let element = this_element(this)?;
    element.set_attribute(&string_argument(args, 0), &string_argument(args, 1))?;
    Ok(Value::Undefined)
}

fn has_attribute(_exec: &mut ExecState, this: &ObjectRef, args: &[Value]) -> JsResult<Value> {
    let element = this_element(this)?;
    Ok(Value::from(element.has_attribute(&string_argument(args, 0))))
}

fn remove_attribute(_exec: &mut ExecState, this: &ObjectRef, args: &[Value]) -> JsResult<Value> {
    let element = this_element(this)?;
    element.remove_attribute(&string_argument(args, 0));
    Ok(Value::Undefined)
}

native_function_factory!(fn get_attribute_factory => get_attribute);
native_function_factory!(fn set_attribute_factory => set_attribute);
native_function_factory!(fn has_attribute_factory => has_attribute);
native_function_factory!(fn remove_attribute_factory => remove_attribute);

static_hash_table! {
    fn element_prototype_table = [
        PropertySpec::function("getAttribute", get_attribute_factory, 1, Attributes::DONT_DELETE),
        PropertySpec::function("setAttribute", set_attribute_factory, 2, Attributes::DONT_DELETE),
        PropertySpec::function("hasAttribute", has_attribute_factory, 1, Attributes::DONT_DELETE),
        PropertySpec::function("removeAttribute", remove_attribute_factory, 1, Attributes::DONT_DELETE),
    ]
}

static ELEMENT_PROTOTYPE_RESOLVER: StaticFunctionResolver = StaticFunctionResolver::new(element_prototype_table);

static ELEMENT_PROTOTYPE_INFO: ClassInfo = ClassInfo {
    class_name: "ElementPrototype",
    parent: None,
    resolver: Some(&ELEMENT_PROTOTYPE_RESOLVER),
};

/// Prototype of element wrappers; inherits the node methods.
pub static ELEMENT_PROTOTYPE: PrototypeDefinition = PrototypeDefinition {
    key: "ElementPrototype",
    class_info: &ELEMENT_PROTOTYPE_INFO,
    parent: Some(&NODE_PROTOTYPE),
};
