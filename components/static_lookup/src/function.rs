//! Native function objects.
//!
//! Method entries in a static table carry a [`FunctionFactory`]; the
//! factory builds a [`NativeFunction`] the first time the method is read.
//! [`native_function_factory!`](crate::native_function_factory) generates
//! such a factory from a plain Rust function.
//!
//! [`FunctionFactory`]: crate::FunctionFactory

use std::fmt;
use std::rc::Rc;

use core_types::{Attributes, Identifier, JsError, JsResult};

use crate::exec_state::ExecState;
use crate::object::{ClassInfo, JsObject, ObjectBase, ObjectRef};
use crate::value::Value;

/// Body of a native function: `(exec, this, arguments)`.
pub type NativeCall = fn(&mut ExecState, &ObjectRef, &[Value]) -> JsResult<Value>;

/// Class metadata of native functions.
pub static FUNCTION_INFO: ClassInfo = ClassInfo {
    class_name: "Function",
    parent: None,
    resolver: None,
};

/// A callable host object wrapping a [`NativeCall`].
pub struct NativeFunction {
    base: ObjectBase,
    name: Identifier,
    arity: u32,
    call: NativeCall,
}

impl NativeFunction {
    /// Create a function object in the current realm.
    ///
    /// `length` is defined as `arity`, read-only and hidden from
    /// enumeration.
    pub fn create(exec: &mut ExecState, name: &Identifier, arity: u32, call: NativeCall) -> ObjectRef {
        let prototype = exec.lexical_global_object().function_prototype().clone();
        let function = NativeFunction {
            base: ObjectBase::with_prototype(Some(prototype)),
            name: name.clone(),
            arity,
            call,
        };
        function.base.put_direct(
            exec.identifiers().length.clone(),
            Value::from(arity),
            Attributes::DONT_DELETE | Attributes::READ_ONLY | Attributes::DONT_ENUM,
        );
        Rc::new(function)
    }

    /// The name the function was created under.
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// Declared argument count.
    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// Run the function body.
    pub fn call(&self, exec: &mut ExecState, this: &ObjectRef, args: &[Value]) -> JsResult<Value> {
        (self.call)(exec, this, args)
    }
}

impl JsObject for NativeFunction {
    fn class_info(&self) -> &'static ClassInfo {
        &FUNCTION_INFO
    }

    fn object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn is_callable(&self) -> bool {
        true
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Call `callee` with `this` and `args`.
///
/// # Errors
///
/// Throws a `TypeError` when `callee` is not a function; otherwise returns
/// whatever the function body returns.
pub fn call_function(exec: &mut ExecState, callee: &Value, this: &ObjectRef, args: &[Value]) -> JsResult<Value> {
    let function = callee
        .as_object()
        .and_then(|object| object.downcast_ref::<NativeFunction>());
    match function {
        Some(function) => function.call(exec, this, args),
        None => Err(JsError::type_error(format!("{} is not a function", callee))),
    }
}

/// Generate a [`FunctionFactory`](crate::FunctionFactory) for a
/// [`NativeCall`](crate::NativeCall) body.
///
/// # Examples
///
/// ```
/// use core_types::{Attributes, JsResult};
/// use static_lookup::{native_function_factory, ExecState, ObjectRef, PropertySpec, Value};
///
/// fn answer(_exec: &mut ExecState, _this: &ObjectRef, _args: &[Value]) -> JsResult<Value> {
///     Ok(Value::from(42))
/// }
///
/// native_function_factory!(fn answer_factory => answer);
///
/// const ENTRY: PropertySpec = PropertySpec::function("answer", answer_factory, 0, Attributes::empty());
/// assert!(ENTRY.attributes.is_function());
/// ```
#[macro_export]
macro_rules! native_function_factory {
    ($(#[$meta:meta])* $vis:vis fn $factory:ident => $body:path) => {
        $(#[$meta])*
        $vis fn $factory(
            exec: &mut $crate::ExecState,
            arity: u32,
            name: &$crate::Identifier,
        ) -> $crate::ObjectRef {
            $crate::NativeFunction::create(exec, name, arity, $body)
        }
    };
}
