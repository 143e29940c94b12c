//! The realm object and its singleton registry.
//!
//! Each [`GlobalObject`] owns the realm's shared prototypes and a registry of
//! lazily constructed singletons (constructor objects, prototype objects).
//! The registry is keyed by a static tag and lives outside the scripted
//! property namespace, so singletons never show up in enumeration and cannot
//! be shadowed or deleted by script.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use core_types::{JsError, JsResult};

use crate::exec_state::ExecState;
use crate::object::{downcast_rc, ClassInfo, JsObject, ObjectBase, ObjectRef, PlainObject};

/// Class metadata of the realm object.
pub static GLOBAL_INFO: ClassInfo = ClassInfo {
    class_name: "global",
    parent: None,
    resolver: None,
};

/// A realm's global object.
pub struct GlobalObject {
    base: ObjectBase,
    object_prototype: ObjectRef,
    function_prototype: ObjectRef,
    singletons: RefCell<HashMap<&'static str, ObjectRef>>,
}

impl GlobalObject {
    /// Create a fresh realm.
    pub fn new() -> Rc<Self> {
        let object_prototype = PlainObject::create(None);
        let function_prototype = PlainObject::create(Some(object_prototype.clone()));
        Rc::new(GlobalObject {
            base: ObjectBase::with_prototype(Some(object_prototype.clone())),
            object_prototype,
            function_prototype,
            singletons: RefCell::new(HashMap::new()),
        })
    }

    /// The realm's `Object.prototype`.
    pub fn object_prototype(&self) -> &ObjectRef {
        &self.object_prototype
    }

    /// The realm's `Function.prototype`.
    pub fn function_prototype(&self) -> &ObjectRef {
        &self.function_prototype
    }

    /// The singleton registered under `key`, if any.
    pub fn singleton(&self, key: &'static str) -> Option<ObjectRef> {
        self.singletons.borrow().get(key).cloned()
    }

    /// Register `object` under `key` unless a singleton is already there.
    ///
    /// Returns the registered singleton, which is the earlier one when the
    /// key was taken.
    pub fn register_singleton(&self, key: &'static str, object: ObjectRef) -> ObjectRef {
        self.singletons
            .borrow_mut()
            .entry(key)
            .or_insert(object)
            .clone()
    }

    /// Number of registered singletons.
    pub fn singleton_count(&self) -> usize {
        self.singletons.borrow().len()
    }
}

impl JsObject for GlobalObject {
    fn class_info(&self) -> &'static ClassInfo {
        &GLOBAL_INFO
    }

    fn object_base(&self) -> &ObjectBase {
        &self.base
    }
}

impl fmt::Debug for GlobalObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalObject")
            .field("base", &self.base)
            .field("singletons", &self.singleton_count())
            .finish()
    }
}

/// A host type with one instance per realm.
pub trait GlobalSingleton: JsObject + Sized {
    /// Build the realm's instance. Runs at most once per realm and key.
    fn construct(exec: &mut ExecState) -> Self;
}

/// The realm's `T` registered under `key`, constructed on first request.
///
/// # Errors
///
/// Returns an internal error if `key` already holds an object of another
/// type.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use static_lookup::{
///     cache_global_object, ClassInfo, ExecState, GlobalSingleton, JsObject, ObjectBase,
/// };
///
/// static COUNTER_INFO: ClassInfo = ClassInfo {
///     class_name: "Counter",
///     parent: None,
///     resolver: None,
/// };
///
/// #[derive(Default)]
/// struct Counter {
///     base: ObjectBase,
/// }
///
/// impl JsObject for Counter {
///     fn class_info(&self) -> &'static ClassInfo {
///         &COUNTER_INFO
///     }
///     fn object_base(&self) -> &ObjectBase {
///         &self.base
///     }
/// }
///
/// impl GlobalSingleton for Counter {
///     fn construct(_exec: &mut ExecState) -> Self {
///         Counter::default()
///     }
/// }
///
/// let mut exec = ExecState::with_new_realm();
/// let first = cache_global_object::<Counter>(&mut exec, "Counter").unwrap();
/// let second = cache_global_object::<Counter>(&mut exec, "Counter").unwrap();
/// assert!(Rc::ptr_eq(&first, &second));
/// ```
pub fn cache_global_object<T: GlobalSingleton>(exec: &mut ExecState, key: &'static str) -> JsResult<Rc<T>> {
    let object = cache_global_object_with(exec, key, |exec| {
        let object: ObjectRef = Rc::new(T::construct(exec));
        object
    });
    let class_name = object.class_info().class_name;
    downcast_rc::<T>(object).ok_or_else(|| {
        log::error!(
            "singleton `{}` holds a {}, not a {}",
            key,
            class_name,
            std::any::type_name::<T>()
        );
        JsError::internal(format!("singleton `{}` has unexpected type {}", key, class_name))
    })
}

/// The realm singleton registered under `key`, built by `construct` on
/// first request.
pub fn cache_global_object_with<F>(exec: &mut ExecState, key: &'static str, construct: F) -> ObjectRef
where
    F: FnOnce(&mut ExecState) -> ObjectRef,
{
    if let Some(existing) = exec.lexical_global_object().singleton(key) {
        return existing;
    }

    log::debug!("constructing realm singleton `{}`", key);
    // The registry is not borrowed while constructing, so construction may
    // itself request other singletons.
    let object = construct(exec);
    exec.lexical_global_object().register_singleton(key, object)
}
