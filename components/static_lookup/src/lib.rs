//! Static property tables and dispatch for natively-implemented objects.
//!
//! Host types (DOM nodes, built-in constructors, prototype objects) describe
//! their script-visible properties in a static [`HashTable`]. Property
//! access on such an object resolves the name against the table; a hit
//! binds a [`PropertySlot`] to either a data-property getter or a method
//! getter that materializes and caches a [`NativeFunction`] wrapper, and a
//! miss is handed to the parent class.
//!
//! # Overview
//!
//! - [`HashTable`] / [`HashEntry`] - Immutable bucketed property tables
//! - [`PropertySlot`] - Deferred property resolution
//! - [`get_static_property_slot`], [`get_static_function_slot`],
//!   [`get_static_value_slot`], [`lookup_put`] - Dispatch helpers
//! - [`JsObject`] / [`ObjectOps`] - Host object protocol
//! - [`cache_global_object`] - Per-realm singletons
//!
//! # Example
//!
//! ```
//! use core_types::Identifier;
//! use static_lookup::{ExecState, ObjectOps, PlainObject, Value};
//!
//! let mut exec = ExecState::with_new_realm();
//! let object = PlainObject::create(None);
//! let name = Identifier::new("missing");
//!
//! assert!(!object.has_property(&mut exec, &name));
//! assert_eq!(object.get(&mut exec, &name).unwrap(), Value::Undefined);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod dispatch;
pub mod exec_state;
pub mod function;
pub mod global_object;
pub mod hash_table;
pub mod object;
pub mod property_slot;
pub mod prototype;
pub mod value;

// Re-export main types at crate root
pub use core_types::{Attributes, ErrorKind, Identifier, JsError, JsResult};
pub use dispatch::{
    get_static_function_slot, get_static_property_slot, get_static_value_slot, lookup_put,
    lookup_put_or_parent, static_function_getter, static_value_getter, StaticFunctionResolver,
    StaticPropertyResolver, StaticValueResolver, ValueProperties,
};
pub use exec_state::{CommonIdentifiers, ExecState};
pub use function::{call_function, NativeCall, NativeFunction, FUNCTION_INFO};
pub use global_object::{
    cache_global_object, cache_global_object_with, GlobalObject, GlobalSingleton, GLOBAL_INFO,
};
pub use hash_table::{
    EntryValue, FunctionFactory, HashEntry, HashTable, PropertySpec, TableLayout,
};
pub use object::{
    downcast_rc, ClassInfo, JsObject, ObjectBase, ObjectOps, ObjectRef, PlainObject,
    ParentGet, ParentPut, PropertyResolver, StoredProperty, OBJECT_INFO,
};
pub use property_slot::{PropertySlot, SlotKind, StaticGetter, ValueGetter};
pub use prototype::{PrototypeDefinition, PrototypeObject};
pub use value::Value;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
