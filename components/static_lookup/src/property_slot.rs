//! Deferred property resolution.
//!
//! A [`PropertySlot`] records where a property was found and how to
//! produce its value. Lookup only fills the slot in; the value is computed
//! when the slot is read, so a lookup that is only testing for presence
//! never materializes a method wrapper.

use core_types::{Identifier, JsResult};

use crate::dispatch::static_function_getter;
use crate::exec_state::ExecState;
use crate::hash_table::HashEntry;
use crate::object::ObjectRef;
use crate::value::Value;

/// Reads a data property through its type-specific token.
pub type ValueGetter = fn(&mut ExecState, &ObjectRef, &'static HashEntry) -> JsResult<Value>;

/// Getter strategy bound to a static entry.
#[derive(Clone, Copy)]
pub enum StaticGetter {
    /// Materialize (or fetch the cached) method wrapper
    Function,
    /// Ask the host object for the value behind the entry's token
    Value(ValueGetter),
}

/// What kind of result a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Nothing resolved yet
    Unset,
    /// A directly stored value
    Direct,
    /// A static method entry
    StaticFunction,
    /// A static data property entry
    StaticValue,
}

#[derive(Default)]
enum SlotContent {
    #[default]
    Unset,
    Direct {
        base: ObjectRef,
        value: Value,
    },
    StaticEntry {
        base: ObjectRef,
        entry: &'static HashEntry,
        getter: StaticGetter,
    },
}

/// Out-parameter filled in by property lookup.
#[derive(Default)]
pub struct PropertySlot {
    content: SlotContent,
}

impl PropertySlot {
    /// An unset slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a directly stored value found on `base`.
    pub fn set_value(&mut self, base: ObjectRef, value: Value) {
        self.content = SlotContent::Direct { base, value };
    }

    /// Bind a static table entry found for `base`, read later by `getter`.
    pub fn set_static_entry(&mut self, base: ObjectRef, entry: &'static HashEntry, getter: StaticGetter) {
        self.content = SlotContent::StaticEntry { base, entry, getter };
    }

    /// Returns true once a lookup has bound the slot.
    pub fn is_set(&self) -> bool {
        !matches!(self.content, SlotContent::Unset)
    }

    /// What the slot is bound to.
    pub fn kind(&self) -> SlotKind {
        match &self.content {
            SlotContent::Unset => SlotKind::Unset,
            SlotContent::Direct { .. } => SlotKind::Direct,
            SlotContent::StaticEntry {
                getter: StaticGetter::Function,
                ..
            } => SlotKind::StaticFunction,
            SlotContent::StaticEntry {
                getter: StaticGetter::Value(_),
                ..
            } => SlotKind::StaticValue,
        }
    }

    /// The object the property was found on.
    pub fn slot_base(&self) -> Option<&ObjectRef> {
        match &self.content {
            SlotContent::Unset => None,
            SlotContent::Direct { base, .. } | SlotContent::StaticEntry { base, .. } => Some(base),
        }
    }

    /// The static entry the slot is bound to.
    pub fn static_entry(&self) -> Option<&'static HashEntry> {
        match &self.content {
            SlotContent::StaticEntry { entry, .. } => Some(*entry),
            _ => None,
        }
    }

    /// Produce the property value.
    ///
    /// An unset slot reads as `undefined`.
    pub fn get_value(&self, exec: &mut ExecState, name: &Identifier) -> JsResult<Value> {
        match &self.content {
            SlotContent::Unset => Ok(Value::Undefined),
            SlotContent::Direct { value, .. } => Ok(value.clone()),
            SlotContent::StaticEntry {
                base,
                entry,
                getter: StaticGetter::Function,
            } => static_function_getter(exec, base, *entry, name),
            SlotContent::StaticEntry {
                base,
                entry,
                getter: StaticGetter::Value(getter),
            } => getter(exec, base, *entry),
        }
    }
}
