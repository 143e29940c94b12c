//! Static property dispatch.
//!
//! These helpers connect a host type's static [`HashTable`] to the object
//! protocol. On a table hit they bind the slot to the function getter or
//! the value getter; on a miss they hand the request to the parent
//! procedure. Three get-side families exist, matching the three table
//! shapes:
//!
//! | helper                       | table holds        |
//! |------------------------------|--------------------|
//! | [`get_static_property_slot`] | values and methods |
//! | [`get_static_function_slot`] | methods only       |
//! | [`get_static_value_slot`]    | values only        |
//!
//! A hit that contradicts the table's declared shape means the table was
//! written wrong. Debug builds assert; release builds log a warning and
//! dispatch on what the entry actually is.

use std::any::type_name;
use std::marker::PhantomData;

use core_types::{Attributes, Identifier, JsError, JsResult};

use crate::exec_state::ExecState;
use crate::hash_table::{HashEntry, HashTable};
use crate::object::{JsObject, ObjectRef, ParentGet, ParentPut, PropertyResolver};
use crate::property_slot::{PropertySlot, StaticGetter};
use crate::value::Value;

/// Data properties of a host type, addressed by table token.
pub trait ValueProperties: JsObject + Sized {
    /// Read the data property identified by `token`.
    fn get_value_property(&self, exec: &mut ExecState, token: i32) -> JsResult<Value>;

    /// Write the data property identified by `token`.
    ///
    /// Only called for entries without `READ_ONLY`. Types whose tables
    /// hold no writable values can keep the default, which reports the
    /// misconfigured table.
    fn put_value_property(
        &self,
        _exec: &mut ExecState,
        token: i32,
        _value: Value,
        _attributes: Attributes,
    ) -> JsResult<()> {
        Err(JsError::internal(format!(
            "{} has no writable value property for token {}",
            self.class_info().class_name,
            token
        )))
    }
}

/// Read a method entry.
///
/// The first read materializes the wrapper through the entry's factory and
/// caches it on `base` under `name` with the entry's attributes. Later
/// reads return the cached object, or whatever has replaced it since.
pub fn static_function_getter(
    exec: &mut ExecState,
    base: &ObjectRef,
    entry: &'static HashEntry,
    name: &Identifier,
) -> JsResult<Value> {
    if let Some(cached) = base.object_base().get_direct(name) {
        return Ok(cached);
    }

    let Some(factory) = entry.function_factory() else {
        // A value entry bound to the function getter: the slot was bound
        // from a mis-shaped table.
        return Err(JsError::internal(format!(
            "`{}` is not a method of {}",
            name,
            base.class_info().class_name
        )));
    };

    log::debug!(
        "materializing {}.{} (arity {})",
        base.class_info().class_name,
        name,
        entry.arity()
    );
    let function = Value::Object(factory(exec, entry.arity(), name));
    base.object_base()
        .put_direct(name.clone(), function.clone(), entry.attributes());
    Ok(function)
}

/// Read a data property entry through `T`'s token getter.
pub fn static_value_getter<T: ValueProperties>(
    exec: &mut ExecState,
    base: &ObjectRef,
    entry: &'static HashEntry,
) -> JsResult<Value> {
    let Some(this) = base.downcast_ref::<T>() else {
        debug_assert!(
            false,
            "value getter for {} bound to a {}",
            type_name::<T>(),
            base.class_info().class_name
        );
        return Err(JsError::internal(format!(
            "{} is not a {}",
            base.class_info().class_name,
            type_name::<T>()
        )));
    };
    match entry.token() {
        Some(token) => this.get_value_property(exec, token),
        None => Err(JsError::internal(format!(
            "`{}` is a method, not a value property",
            entry.name()
        ))),
    }
}

fn function_shape_violation(entry: &HashEntry, table_shape: &str) {
    debug_assert!(
        false,
        "`{}` does not fit a {} table",
        entry.name(),
        table_shape
    );
    log::warn!(
        "static table entry `{}` does not fit a {} table; dispatching by entry kind",
        entry.name(),
        table_shape
    );
}

/// Resolve `name` against a table holding both methods and values.
///
/// On a hit the slot is bound to the function getter for method entries
/// and to `T`'s value getter otherwise, and the result is `true`. On a miss
/// the result is whatever `parent` returns.
pub fn get_static_property_slot<T, P>(
    exec: &mut ExecState,
    table: &'static HashTable,
    this: &ObjectRef,
    name: &Identifier,
    slot: &mut PropertySlot,
    parent: P,
) -> bool
where
    T: ValueProperties,
    P: FnOnce(&mut ExecState, &mut PropertySlot) -> bool,
{
    let Some(entry) = table.find_entry(name) else {
        return parent(exec, slot);
    };

    if entry.is_function() {
        slot.set_static_entry(this.clone(), entry, StaticGetter::Function);
    } else {
        slot.set_static_entry(this.clone(), entry, StaticGetter::Value(static_value_getter::<T>));
    }
    true
}

/// Resolve `name` against a table holding only methods.
///
/// Used by types that expose no data properties, so they need no value
/// getter at all.
pub fn get_static_function_slot<P>(
    exec: &mut ExecState,
    table: &'static HashTable,
    this: &ObjectRef,
    name: &Identifier,
    slot: &mut PropertySlot,
    parent: P,
) -> bool
where
    P: FnOnce(&mut ExecState, &mut PropertySlot) -> bool,
{
    let Some(entry) = table.find_entry(name) else {
        return parent(exec, slot);
    };

    if !entry.is_function() {
        function_shape_violation(entry, "function-only");
        // Without a value getter there is nothing to read it with
        return parent(exec, slot);
    }

    slot.set_static_entry(this.clone(), entry, StaticGetter::Function);
    true
}

/// Resolve `name` against a table holding only data properties.
pub fn get_static_value_slot<T, P>(
    exec: &mut ExecState,
    table: &'static HashTable,
    this: &ObjectRef,
    name: &Identifier,
    slot: &mut PropertySlot,
    parent: P,
) -> bool
where
    T: ValueProperties,
    P: FnOnce(&mut ExecState, &mut PropertySlot) -> bool,
{
    let Some(entry) = table.find_entry(name) else {
        return parent(exec, slot);
    };

    if entry.is_function() {
        function_shape_violation(entry, "value-only");
        slot.set_static_entry(this.clone(), entry, StaticGetter::Function);
        return true;
    }

    slot.set_static_entry(this.clone(), entry, StaticGetter::Value(static_value_getter::<T>));
    true
}

/// Handle a write through the static table.
///
/// Returns `Ok(false)` on a miss so the caller can delegate. On a hit:
///
/// - a method entry is overridden per instance with a generic write;
/// - a `READ_ONLY` value entry ignores the write;
/// - a writable value entry goes to `T::put_value_property`.
///
/// Every hit returns `Ok(true)`, whether or not state changed.
pub fn lookup_put<T: ValueProperties>(
    exec: &mut ExecState,
    name: &Identifier,
    value: &Value,
    attributes: Attributes,
    table: &'static HashTable,
    this: &ObjectRef,
) -> JsResult<bool> {
    let Some(entry) = table.find_entry(name) else {
        return Ok(false);
    };

    match entry.token() {
        None => {
            this.object_base()
                .put(name.clone(), value.clone(), attributes);
        }
        Some(_) if entry.attributes().is_read_only() => {
            log::trace!("ignoring write to read-only `{}`", name);
        }
        Some(token) => {
            let Some(object) = this.downcast_ref::<T>() else {
                debug_assert!(false, "lookup_put for {} on a {}", type_name::<T>(), this.class_info().class_name);
                return Err(JsError::internal(format!(
                    "{} is not a {}",
                    this.class_info().class_name,
                    type_name::<T>()
                )));
            };
            object.put_value_property(exec, token, value.clone(), attributes)?;
        }
    }
    Ok(true)
}

/// [`lookup_put`], delegating a miss to `parent`.
pub fn lookup_put_or_parent<T, P>(
    exec: &mut ExecState,
    name: &Identifier,
    value: Value,
    attributes: Attributes,
    table: &'static HashTable,
    this: &ObjectRef,
    parent: P,
) -> JsResult<()>
where
    T: ValueProperties,
    P: FnOnce(&mut ExecState, Value) -> JsResult<()>,
{
    if lookup_put::<T>(exec, name, &value, attributes, table, this)? {
        Ok(())
    } else {
        parent(exec, value)
    }
}

/// Resolver for a table holding methods and values.
///
/// Usable in statics:
///
/// ```ignore
/// static NODE_RESOLVER: StaticPropertyResolver<Node> = StaticPropertyResolver::new(node_table);
/// ```
pub struct StaticPropertyResolver<T> {
    table: fn() -> &'static HashTable,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StaticPropertyResolver<T> {
    /// Create a resolver over the table returned by `table`.
    pub const fn new(table: fn() -> &'static HashTable) -> Self {
        StaticPropertyResolver {
            table,
            _marker: PhantomData,
        }
    }
}

impl<T: ValueProperties> PropertyResolver for StaticPropertyResolver<T> {
    fn static_table(&self) -> &'static HashTable {
        (self.table)()
    }

    fn get_own_property_slot(
        &self,
        exec: &mut ExecState,
        this: &ObjectRef,
        name: &Identifier,
        slot: &mut PropertySlot,
        parent: ParentGet<'_>,
    ) -> bool {
        get_static_property_slot::<T, _>(exec, self.static_table(), this, name, slot, parent)
    }

    fn put(
        &self,
        exec: &mut ExecState,
        this: &ObjectRef,
        name: &Identifier,
        value: Value,
        attributes: Attributes,
        parent: ParentPut<'_>,
    ) -> JsResult<()> {
        lookup_put_or_parent::<T, _>(exec, name, value, attributes, self.static_table(), this, parent)
    }
}

/// Resolver for a table holding only methods.
///
/// Writes are not table-mediated: they fall through to the parent, which
/// ends in a generic write that overrides the method on the instance.
pub struct StaticFunctionResolver {
    table: fn() -> &'static HashTable,
}

impl StaticFunctionResolver {
    /// Create a resolver over the table returned by `table`.
    pub const fn new(table: fn() -> &'static HashTable) -> Self {
        StaticFunctionResolver { table }
    }
}

impl PropertyResolver for StaticFunctionResolver {
    fn static_table(&self) -> &'static HashTable {
        (self.table)()
    }

    fn get_own_property_slot(
        &self,
        exec: &mut ExecState,
        this: &ObjectRef,
        name: &Identifier,
        slot: &mut PropertySlot,
        parent: ParentGet<'_>,
    ) -> bool {
        get_static_function_slot(exec, self.static_table(), this, name, slot, parent)
    }
}

/// Resolver for a table holding only data properties.
pub struct StaticValueResolver<T> {
    table: fn() -> &'static HashTable,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StaticValueResolver<T> {
    /// Create a resolver over the table returned by `table`.
    pub const fn new(table: fn() -> &'static HashTable) -> Self {
        StaticValueResolver {
            table,
            _marker: PhantomData,
        }
    }
}

impl<T: ValueProperties> PropertyResolver for StaticValueResolver<T> {
    fn static_table(&self) -> &'static HashTable {
        (self.table)()
    }

    fn get_own_property_slot(
        &self,
        exec: &mut ExecState,
        this: &ObjectRef,
        name: &Identifier,
        slot: &mut PropertySlot,
        parent: ParentGet<'_>,
    ) -> bool {
        get_static_value_slot::<T, _>(exec, self.static_table(), this, name, slot, parent)
    }

    fn put(
        &self,
        exec: &mut ExecState,
        this: &ObjectRef,
        name: &Identifier,
        value: Value,
        attributes: Attributes,
        parent: ParentPut<'_>,
    ) -> JsResult<()> {
        lookup_put_or_parent::<T, _>(exec, name, value, attributes, self.static_table(), this, parent)
    }
}
