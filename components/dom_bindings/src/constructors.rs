//! Constructor objects exposing DOM constants.

use std::rc::Rc;

use core_types::{Attributes, JsError, JsResult};
use static_lookup::{
    cache_global_object, static_hash_table, ClassInfo, ExecState, GlobalSingleton, JsObject,
    ObjectBase, PropertySpec, StaticValueResolver, Value, ValueProperties,
};

use crate::exception::DomException;

const CONSTANT: Attributes = Attributes::DONT_DELETE.union(Attributes::READ_ONLY);

// Tokens are the constant values themselves

static_hash_table! {
    fn node_constructor_table = [
        PropertySpec::value("ELEMENT_NODE", 1, CONSTANT),
        PropertySpec::value("TEXT_NODE", 3, CONSTANT),
        PropertySpec::value("COMMENT_NODE", 8, CONSTANT),
        PropertySpec::value("DOCUMENT_NODE", 9, CONSTANT),
    ]
}

static NODE_CONSTRUCTOR_RESOLVER: StaticValueResolver<NodeConstructor> =
    StaticValueResolver::new(node_constructor_table);

static NODE_CONSTRUCTOR_INFO: ClassInfo = ClassInfo {
    class_name: "NodeConstructor",
    parent: None,
    resolver: Some(&NODE_CONSTRUCTOR_RESOLVER),
};

/// The `Node` global: node type constants.
#[derive(Debug)]
pub struct NodeConstructor {
    base: ObjectBase,
}

impl JsObject for NodeConstructor {
    fn class_info(&self) -> &'static ClassInfo {
        &NODE_CONSTRUCTOR_INFO
    }

    fn object_base(&self) -> &ObjectBase {
        &self.base
    }
}

impl GlobalSingleton for NodeConstructor {
    fn construct(exec: &mut ExecState) -> Self {
        let prototype = exec.lexical_global_object().object_prototype().clone();
        NodeConstructor {
            base: ObjectBase::with_prototype(Some(prototype)),
        }
    }
}

impl ValueProperties for NodeConstructor {
    fn get_value_property(&self, _exec: &mut ExecState, token: i32) -> JsResult<Value> {
        Ok(Value::from(token))
    }
}

/// The realm's `Node` constructor object.
pub fn node_constructor(exec: &mut ExecState) -> JsResult<Rc<NodeConstructor>> {
    cache_global_object::<NodeConstructor>(exec, "NodeConstructor")
}

static_hash_table! {
    fn dom_exception_constructor_table = [
        PropertySpec::value("INDEX_SIZE_ERR", 1, CONSTANT),
        PropertySpec::value("HIERARCHY_REQUEST_ERR", 3, CONSTANT),
        PropertySpec::value("WRONG_DOCUMENT_ERR", 4, CONSTANT),
        PropertySpec::value("INVALID_CHARACTER_ERR", 5, CONSTANT),
        PropertySpec::value("NO_MODIFICATION_ALLOWED_ERR", 7, CONSTANT),
        PropertySpec::value("NOT_FOUND_ERR", 8, CONSTANT),
    ]
}

static DOM_EXCEPTION_CONSTRUCTOR_RESOLVER: StaticValueResolver<DomExceptionConstructor> =
    StaticValueResolver::new(dom_exception_constructor_table);

static DOM_EXCEPTION_CONSTRUCTOR_INFO: ClassInfo = ClassInfo {
    class_name: "DOMExceptionConstructor",
    parent: None,
    resolver: Some(&DOM_EXCEPTION_CONSTRUCTOR_RESOLVER),
};

/// The `DOMException` global: exception code constants.
#[derive(Debug)]
pub struct DomExceptionConstructor {
    base: ObjectBase,
}

impl JsObject for DomExceptionConstructor {
    fn class_info(&self) -> &'static ClassInfo {
        &DOM_EXCEPTION_CONSTRUCTOR_INFO
    }

    fn object_base(&self) -> &ObjectBase {
        &self.base
    }
}

impl GlobalSingleton for DomExceptionConstructor {
    fn construct(exec: &mut ExecState) -> Self {
        let prototype = exec.lexical_global_object().object_prototype().clone();
        DomExceptionConstructor {
            base: ObjectBase::with_prototype(Some(prototype)),
        }
    }
}

impl ValueProperties for DomExceptionConstructor {
    fn get_value_property(&self, _exec: &mut ExecState, token: i32) -> JsResult<Value> {
        let known = DomException::ALL
            .iter()
            .any(|exception| i32::from(exception.code()) == token);
        if !known {
            return Err(JsError::internal(format!("unknown DOM exception code {}", token)));
        }
        Ok(Value::from(token))
    }
}

/// The realm's `DOMException` constructor object.
pub fn dom_exception_constructor(exec: &mut ExecState) -> JsResult<Rc<DomExceptionConstructor>> {
    cache_global_object::<DomExceptionConstructor>(exec, "DOMExceptionConstructor")
}
