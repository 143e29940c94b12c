//! Function-only prototype objects for host types.
//!
//! A host type's methods live on a per-realm prototype object whose class
//! resolves names through a function-only static table. Instances reach the
//! methods through their prototype link, and each prototype caches the
//! wrappers it materializes.

use std::fmt;
use std::rc::Rc;

use crate::exec_state::ExecState;
use crate::global_object::cache_global_object_with;
use crate::object::{ClassInfo, JsObject, ObjectBase, ObjectRef};

/// Static description of a prototype object.
#[derive(Debug)]
pub struct PrototypeDefinition {
    /// Singleton registry key
    pub key: &'static str,
    /// Class of the prototype object; its resolver holds the methods
    pub class_info: &'static ClassInfo,
    /// Prototype of this prototype; `None` means the realm's object
    /// prototype
    pub parent: Option<&'static PrototypeDefinition>,
}

impl PrototypeDefinition {
    /// The realm's prototype object for this definition.
    ///
    /// Parent prototypes are created first, so the chain is complete when
    /// the object is returned.
    pub fn get(&'static self, exec: &mut ExecState) -> ObjectRef {
        cache_global_object_with(exec, self.key, |exec| {
            let prototype = match self.parent {
                Some(parent) => parent.get(exec),
                None => exec.lexical_global_object().object_prototype().clone(),
            };
            let object: ObjectRef = Rc::new(PrototypeObject {
                base: ObjectBase::with_prototype(Some(prototype)),
                definition: self,
            });
            object
        })
    }
}

/// A prototype object created from a [`PrototypeDefinition`].
pub struct PrototypeObject {
    base: ObjectBase,
    definition: &'static PrototypeDefinition,
}

impl PrototypeObject {
    /// The definition this prototype was created from.
    pub fn definition(&self) -> &'static PrototypeDefinition {
        self.definition
    }
}

impl JsObject for PrototypeObject {
    fn class_info(&self) -> &'static ClassInfo {
        self.definition.class_info
    }

    fn object_base(&self) -> &ObjectBase {
        &self.base
    }
}

impl fmt::Debug for PrototypeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrototypeObject")
            .field("key", &self.definition.key)
            .field("base", &self.base)
            .finish()
    }
}
