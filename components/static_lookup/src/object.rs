//! Host object protocol.
//!
//! Every natively-implemented object implements [`JsObject`]: it names its
//! static [`ClassInfo`] and owns an [`ObjectBase`] holding its direct
//! properties and prototype. Property access goes through [`ObjectOps`],
//! which walks the class chain explicitly: each class's
//! [`PropertyResolver`] gets a chance to answer from its static table, a
//! miss continues with the parent class, and the chain ends at the direct
//! property store.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::ptr;
use std::rc::Rc;

use core_types::{Attributes, Identifier, JsResult};
use indexmap::IndexMap;

use crate::exec_state::ExecState;
use crate::hash_table::HashTable;
use crate::property_slot::PropertySlot;
use crate::value::Value;

/// Shared reference to a host object.
pub type ObjectRef = Rc<dyn JsObject>;

/// Type-erasure helpers, implemented for every `'static` type.
pub trait AsAny: Any {
    /// View as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Convert a shared reference into `Rc<dyn Any>`.
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// A natively-implemented object exposed to scripts.
pub trait JsObject: AsAny {
    /// Static metadata for this object's type.
    fn class_info(&self) -> &'static ClassInfo;

    /// Direct property store and prototype.
    fn object_base(&self) -> &ObjectBase;

    /// Returns true for callable objects.
    fn is_callable(&self) -> bool {
        false
    }

    /// View this object as an embedded ancestor type.
    ///
    /// A type that extends another host type by embedding it returns the
    /// embedded value when asked for the ancestor's `TypeId`, which lets the
    /// ancestor's value getters run against derived instances.
    fn as_ancestor(&self, _type_id: TypeId) -> Option<&dyn Any> {
        None
    }
}

impl dyn JsObject {
    /// Borrow as a concrete host type, or as one of its embedded ancestors.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any = <dyn JsObject as AsAny>::as_any(self);
        if let Some(object) = any.downcast_ref::<T>() {
            return Some(object);
        }
        self.as_ancestor(TypeId::of::<T>())?.downcast_ref::<T>()
    }

    /// Returns true if the object is (or embeds) a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl fmt::Debug for dyn JsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[object {}]", self.class_info().class_name)
    }
}

/// Convert a shared object into a shared concrete type.
///
/// Only exact types convert; embedded ancestors do not.
pub fn downcast_rc<T: JsObject>(object: ObjectRef) -> Option<Rc<T>> {
    <dyn JsObject as AsAny>::into_any_rc(object).downcast::<T>().ok()
}

/// Static per-type metadata.
///
/// `parent` is the class whose resolver handles names this class's table
/// does not know; a `None` parent ends the chain at the direct property
/// store.
pub struct ClassInfo {
    /// Class name, as shown by `[object ClassName]`
    pub class_name: &'static str,
    /// Parent class for lookup delegation
    pub parent: Option<&'static ClassInfo>,
    /// Static table resolution for this class, if it has a table
    pub resolver: Option<&'static dyn PropertyResolver>,
}

impl ClassInfo {
    /// Returns true if `other` is this class or one of its ancestors.
    pub fn inherits(&self, other: &ClassInfo) -> bool {
        let mut current = Some(self);
        while let Some(info) = current {
            if ptr::eq(info, other) {
                return true;
            }
            current = info.parent;
        }
        false
    }

    /// This class followed by its ancestors.
    pub fn ancestors(&'static self) -> impl Iterator<Item = &'static ClassInfo> {
        std::iter::successors(Some(self), |info| info.parent)
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("class_name", &self.class_name)
            .field("parent", &self.parent.map(|p| p.class_name))
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

/// Continuation that resolves a name through the parent class.
pub type ParentGet<'a> = &'a mut dyn FnMut(&mut ExecState, &mut PropertySlot) -> bool;

/// Continuation that writes a name through the parent class.
pub type ParentPut<'a> = &'a mut dyn FnMut(&mut ExecState, Value) -> JsResult<()>;

/// A class's own static-table property handling.
///
/// Implementations answer from their table and call `parent` on a miss.
pub trait PropertyResolver: Sync {
    /// The static table this resolver dispatches over.
    fn static_table(&self) -> &'static HashTable;

    /// Resolve `name` into `slot`, or delegate to `parent`.
    fn get_own_property_slot(
        &self,
        exec: &mut ExecState,
        this: &ObjectRef,
        name: &Identifier,
        slot: &mut PropertySlot,
        parent: ParentGet<'_>,
    ) -> bool;

    /// Write `name`, or delegate to `parent`.
    fn put(
        &self,
        exec: &mut ExecState,
        _this: &ObjectRef,
        _name: &Identifier,
        value: Value,
        _attributes: Attributes,
        parent: ParentPut<'_>,
    ) -> JsResult<()> {
        parent(exec, value)
    }
}

/// A directly stored property.
#[derive(Debug, Clone)]
pub struct StoredProperty {
    /// The stored value
    pub value: Value,
    /// Its attributes
    pub attributes: Attributes,
}

/// Per-object direct property store and prototype link.
///
/// Direct properties keep insertion order. The store doubles as the cache
/// for materialized method wrappers.
#[derive(Default)]
pub struct ObjectBase {
    properties: RefCell<IndexMap<Identifier, StoredProperty>>,
    prototype: RefCell<Option<ObjectRef>>,
}

impl ObjectBase {
    /// An empty store with no prototype.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store with the given prototype.
    pub fn with_prototype(prototype: Option<ObjectRef>) -> Self {
        ObjectBase {
            properties: RefCell::new(IndexMap::new()),
            prototype: RefCell::new(prototype),
        }
    }

    /// The directly stored value for `name`.
    pub fn get_direct(&self, name: &Identifier) -> Option<Value> {
        self.properties
            .borrow()
            .get(name)
            .map(|property| property.value.clone())
    }

    /// The directly stored value and attributes for `name`.
    pub fn get_direct_property(&self, name: &Identifier) -> Option<StoredProperty> {
        self.properties.borrow().get(name).cloned()
    }

    /// Store `value` unconditionally, replacing value and attributes.
    pub fn put_direct(&self, name: Identifier, value: Value, attributes: Attributes) {
        self.properties
            .borrow_mut()
            .insert(name, StoredProperty { value, attributes });
    }

    /// Generic object write.
    ///
    /// An existing read-only property is left untouched. An existing
    /// writable property takes the new value and keeps its attributes; a
    /// new property takes `attributes`. Returns true if a value was stored.
    pub fn put(&self, name: Identifier, value: Value, attributes: Attributes) -> bool {
        let mut properties = self.properties.borrow_mut();
        match properties.get_mut(&name) {
            Some(existing) if existing.attributes.is_read_only() => false,
            Some(existing) => {
                existing.value = value;
                true
            }
            None => {
                properties.insert(name, StoredProperty { value, attributes });
                true
            }
        }
    }

    /// Remove a direct property, preserving the order of the others.
    pub fn remove_direct(&self, name: &Identifier) -> Option<StoredProperty> {
        self.properties.borrow_mut().shift_remove(name)
    }

    /// Direct property names with their attributes, in insertion order.
    pub fn direct_names(&self) -> Vec<(Identifier, Attributes)> {
        self.properties
            .borrow()
            .iter()
            .map(|(name, property)| (name.clone(), property.attributes))
            .collect()
    }

    /// Number of direct properties.
    pub fn direct_len(&self) -> usize {
        self.properties.borrow().len()
    }

    /// The prototype object.
    pub fn prototype(&self) -> Option<ObjectRef> {
        self.prototype.borrow().clone()
    }

    /// Replace the prototype object.
    pub fn set_prototype(&self, prototype: Option<ObjectRef>) {
        *self.prototype.borrow_mut() = prototype;
    }

    fn get_own_property_slot(&self, this: &ObjectRef, name: &Identifier, slot: &mut PropertySlot) -> bool {
        match self.get_direct(name) {
            Some(value) => {
                slot.set_value(this.clone(), value);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase")
            .field("direct_properties", &self.direct_len())
            .field("has_prototype", &self.prototype.borrow().is_some())
            .finish()
    }
}

/// Class metadata of generic objects.
pub static OBJECT_INFO: ClassInfo = ClassInfo {
    class_name: "Object",
    parent: None,
    resolver: None,
};

/// A generic object: direct properties only.
#[derive(Debug, Default)]
pub struct PlainObject {
    base: ObjectBase,
}

impl PlainObject {
    /// Create a shared generic object with the given prototype.
    pub fn create(prototype: Option<ObjectRef>) -> ObjectRef {
        Rc::new(PlainObject {
            base: ObjectBase::with_prototype(prototype),
        })
    }
}

impl JsObject for PlainObject {
    fn class_info(&self) -> &'static ClassInfo {
        &OBJECT_INFO
    }

    fn object_base(&self) -> &ObjectBase {
        &self.base
    }
}

fn own_slot_from(
    exec: &mut ExecState,
    this: &ObjectRef,
    class: Option<&'static ClassInfo>,
    name: &Identifier,
    slot: &mut PropertySlot,
) -> bool {
    let Some(info) = class else {
        return this.object_base().get_own_property_slot(this, name, slot);
    };
    match info.resolver {
        Some(resolver) => resolver.get_own_property_slot(
            exec,
            this,
            name,
            slot,
            &mut |exec: &mut ExecState, slot: &mut PropertySlot| {
                log::trace!("{}: `{}` not in table, trying parent", info.class_name, name);
                own_slot_from(exec, this, info.parent, name, slot)
            },
        ),
        None => own_slot_from(exec, this, info.parent, name, slot),
    }
}

fn put_from(
    exec: &mut ExecState,
    this: &ObjectRef,
    class: Option<&'static ClassInfo>,
    name: &Identifier,
    value: Value,
    attributes: Attributes,
) -> JsResult<()> {
    let Some(info) = class else {
        this.object_base().put(name.clone(), value, attributes);
        return Ok(());
    };
    match info.resolver {
        Some(resolver) => resolver.put(
            exec,
            this,
            name,
            value,
            attributes,
            &mut |exec: &mut ExecState, value: Value| {
                log::trace!("{}: write to `{}` not handled, trying parent", info.class_name, name);
                put_from(exec, this, info.parent, name, value, attributes)
            },
        ),
        None => put_from(exec, this, info.parent, name, value, attributes),
    }
}

/// Property access on shared host objects.
///
/// # Examples
///
/// ```
/// use core_types::{Attributes, Identifier};
/// use static_lookup::{ExecState, ObjectOps, PlainObject, Value};
///
/// let mut exec = ExecState::with_new_realm();
/// let object = PlainObject::create(None);
/// let name = Identifier::new("answer");
///
/// object.put(&mut exec, &name, Value::from(42), Attributes::empty()).unwrap();
/// assert_eq!(object.get(&mut exec, &name).unwrap(), Value::from(42));
/// assert!(object.delete_property(&name));
/// assert_eq!(object.get(&mut exec, &name).unwrap(), Value::Undefined);
/// ```
pub trait ObjectOps {
    /// Resolve `name` on this object alone: static tables along the class
    /// chain first, then direct properties.
    fn get_own_property_slot(&self, exec: &mut ExecState, name: &Identifier, slot: &mut PropertySlot) -> bool;

    /// Resolve `name` on this object, then along its prototype chain.
    fn get_property_slot(&self, exec: &mut ExecState, name: &Identifier, slot: &mut PropertySlot) -> bool;

    /// Read `name`; `undefined` when absent.
    fn get(&self, exec: &mut ExecState, name: &Identifier) -> JsResult<Value>;

    /// Write `name` through the class chain, ending at a generic write.
    fn put(&self, exec: &mut ExecState, name: &Identifier, value: Value, attributes: Attributes) -> JsResult<()>;

    /// Returns true if `name` resolves on this object or its prototypes.
    fn has_property(&self, exec: &mut ExecState, name: &Identifier) -> bool;

    /// Delete a direct property. Refused (false) for `DONT_DELETE` direct
    /// properties and for `DONT_DELETE` static entries of any class in the
    /// chain.
    fn delete_property(&self, name: &Identifier) -> bool;

    /// Enumerable names: direct properties, then static entries along the
    /// class chain, then the prototype chain. Each name appears once.
    fn property_names(&self) -> Vec<Identifier>;

    /// The class name of this object.
    fn class_name(&self) -> &'static str;

    /// `[object ClassName]`
    fn to_display_string(&self) -> String;
}

impl ObjectOps for ObjectRef {
    fn get_own_property_slot(&self, exec: &mut ExecState, name: &Identifier, slot: &mut PropertySlot) -> bool {
        own_slot_from(exec, self, Some(self.class_info()), name, slot)
    }

    fn get_property_slot(&self, exec: &mut ExecState, name: &Identifier, slot: &mut PropertySlot) -> bool {
        let mut object = self.clone();
        loop {
            if object.get_own_property_slot(exec, name, slot) {
                return true;
            }
            match object.object_base().prototype() {
                Some(prototype) => {
                    log::trace!(
                        "`{}` not found on {}, walking to prototype {}",
                        name,
                        object.class_name(),
                        prototype.class_name()
                    );
                    object = prototype;
                }
                None => return false,
            }
        }
    }

    fn get(&self, exec: &mut ExecState, name: &Identifier) -> JsResult<Value> {
        let mut slot = PropertySlot::new();
        if self.get_property_slot(exec, name, &mut slot) {
            slot.get_value(exec, name)
        } else {
            Ok(Value::Undefined)
        }
    }

    fn put(&self, exec: &mut ExecState, name: &Identifier, value: Value, attributes: Attributes) -> JsResult<()> {
        put_from(exec, self, Some(self.class_info()), name, value, attributes)
    }

    fn has_property(&self, exec: &mut ExecState, name: &Identifier) -> bool {
        let mut slot = PropertySlot::new();
        self.get_property_slot(exec, name, &mut slot)
    }

    fn delete_property(&self, name: &Identifier) -> bool {
        let base = self.object_base();
        if let Some(property) = base.get_direct_property(name) {
            if property.attributes.is_dont_delete() {
                return false;
            }
            base.remove_direct(name);
            return true;
        }

        let protected = self
            .class_info()
            .ancestors()
            .filter_map(|info| info.resolver)
            .filter_map(|resolver| resolver.static_table().find_entry(name))
            .any(|entry| entry.attributes().is_dont_delete());
        !protected
    }

    fn property_names(&self) -> Vec<Identifier> {
        fn push(name: Identifier, names: &mut Vec<Identifier>) {
            if !names.contains(&name) {
                names.push(name);
            }
        }

        let mut names: Vec<Identifier> = Vec::new();

        let mut object = Some(self.clone());
        while let Some(current) = object {
            for (name, attributes) in current.object_base().direct_names() {
                if !attributes.is_dont_enum() {
                    push(name, &mut names);
                }
            }
            for info in current.class_info().ancestors() {
                let Some(resolver) = info.resolver else {
                    continue;
                };
                for entry in resolver.static_table().iter() {
                    if !entry.attributes().is_dont_enum() {
                        push(Identifier::new(entry.name()), &mut names);
                    }
                }
            }
            object = current.object_base().prototype();
        }
        names
    }

    fn class_name(&self) -> &'static str {
        self.class_info().class_name
    }

    fn to_display_string(&self) -> String {
        format!("[object {}]", self.class_name())
    }
}
