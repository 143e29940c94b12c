//! Execution context handed to every getter, writer and native call.

use std::rc::Rc;

use core_types::{Identifier, JsError};

use crate::global_object::GlobalObject;
use crate::object::ObjectRef;

/// Identifiers used by the lookup machinery itself.
#[derive(Debug, Clone)]
pub struct CommonIdentifiers {
    /// `length`
    pub length: Identifier,
    /// `prototype`
    pub prototype: Identifier,
    /// `constructor`
    pub constructor: Identifier,
}

impl CommonIdentifiers {
    fn new() -> Self {
        CommonIdentifiers {
            length: Identifier::new("length"),
            prototype: Identifier::new("prototype"),
            constructor: Identifier::new("constructor"),
        }
    }
}

/// Per-call execution state.
///
/// Carries the realm's global object, which owns the per-realm singleton
/// registry, and a pending-exception slot for hosts that report errors out
/// of band.
///
/// # Examples
///
/// ```
/// use core_types::JsError;
/// use static_lookup::ExecState;
///
/// let mut exec = ExecState::with_new_realm();
/// assert!(!exec.had_exception());
///
/// exec.set_exception(JsError::type_error("not a function"));
/// assert!(exec.had_exception());
/// assert!(exec.take_exception().is_some());
/// assert!(!exec.had_exception());
/// ```
#[derive(Debug)]
pub struct ExecState {
    global: Rc<GlobalObject>,
    exception: Option<JsError>,
    identifiers: CommonIdentifiers,
}

impl ExecState {
    /// Execution state running in the realm of `global`.
    pub fn new(global: Rc<GlobalObject>) -> Self {
        ExecState {
            global,
            exception: None,
            identifiers: CommonIdentifiers::new(),
        }
    }

    /// Execution state in a freshly created realm.
    pub fn with_new_realm() -> Self {
        Self::new(GlobalObject::new())
    }

    /// The realm's global object.
    pub fn lexical_global_object(&self) -> &Rc<GlobalObject> {
        &self.global
    }

    /// The realm's global object as a generic object reference.
    pub fn global_object_ref(&self) -> ObjectRef {
        self.global.clone()
    }

    /// Common identifiers.
    pub fn identifiers(&self) -> &CommonIdentifiers {
        &self.identifiers
    }

    /// Record a pending exception, replacing any earlier one.
    pub fn set_exception(&mut self, error: JsError) {
        log::debug!("exception raised: {}", error);
        self.exception = Some(error);
    }

    /// Returns true while an exception is pending.
    pub fn had_exception(&self) -> bool {
        self.exception.is_some()
    }

    /// Take the pending exception, clearing it.
    pub fn take_exception(&mut self) -> Option<JsError> {
        self.exception.take()
    }
}
