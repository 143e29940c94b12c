//! Script bindings for an in-memory DOM tree.
//!
//! Each node kind is exposed through a host class with a static value
//! table (`Node`, `Element`) and a function-only prototype
//! (`NodePrototype`, `ElementPrototype`). The `Node` and `DOMException`
//! globals are realm singletons carrying the DOM constants.
//!
//! # Example
//!
//! ```
//! use core_types::Identifier;
//! use dom_bindings::{install, to_js, NodeImpl};
//! use static_lookup::{ExecState, ObjectOps, Value};
//!
//! let mut exec = ExecState::with_new_realm();
//! install(&mut exec).unwrap();
//!
//! let div = NodeImpl::element("div");
//! let wrapper = to_js(&mut exec, &div);
//! let tag = wrapper.get(&mut exec, &Identifier::new("tagName")).unwrap();
//! assert_eq!(tag, Value::from("DIV"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod constructors;
pub mod element;
pub mod exception;
pub mod node;
pub mod node_impl;

pub use constructors::{dom_exception_constructor, node_constructor, DomExceptionConstructor, NodeConstructor};
pub use element::{Element, ELEMENT_INFO, ELEMENT_PROTOTYPE};
pub use exception::DomException;
pub use node::{to_js, to_node, wrapper_cache, Node, WrapperCache, NODE_INFO, NODE_PROTOTYPE};
pub use node_impl::{NodeHandle, NodeImpl, NodeType};

use core_types::{Attributes, Identifier, JsResult};
use static_lookup::{ExecState, ObjectOps, ObjectRef, Value};

/// Define the `Node` and `DOMException` globals on the realm's global
/// object, hidden from enumeration.
pub fn install(exec: &mut ExecState) -> JsResult<()> {
    let global = exec.global_object_ref();

    let node: ObjectRef = node_constructor(exec)?;
    global.put(exec, &Identifier::new("Node"), Value::Object(node), Attributes::DONT_ENUM)?;

    let dom_exception: ObjectRef = dom_exception_constructor(exec)?;
    global.put(
        exec,
        &Identifier::new("DOMException"),
        Value::Object(dom_exception),
        Attributes::DONT_ENUM,
    )?;

    log::debug!("installed DOM globals");
    Ok(())
}
