//! Error types for scripted host objects and static tables.
//!
//! Property misses are never errors: they surface as `false` or `None` and
//! trigger delegation. [`JsError`] is what a getter, setter, or native
//! function throws; [`TableError`] rejects a malformed table listing.

use std::fmt;

use thiserror::Error;

/// The kind of a scripted error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Type error (e.g., calling a non-function)
    TypeError,
    /// Reference to an undefined binding
    ReferenceError,
    /// Value out of allowed range
    RangeError,
    /// Internal engine error (a broken contract between engine parts)
    InternalError,
    /// DOM exception carrying its numeric code
    DomException(u16),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TypeError => write!(f, "TypeError"),
            ErrorKind::ReferenceError => write!(f, "ReferenceError"),
            ErrorKind::RangeError => write!(f, "RangeError"),
            ErrorKind::InternalError => write!(f, "InternalError"),
            ErrorKind::DomException(code) => write!(f, "DOM exception {}", code),
        }
    }
}

/// A scripted exception with a kind and a message.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, JsError};
///
/// let error = JsError::dom_exception(8, "node not found");
/// assert_eq!(error.kind, ErrorKind::DomException(8));
/// assert_eq!(error.to_string(), "DOM exception 8: node not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct JsError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl JsError {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        JsError {
            kind,
            message: message.into(),
        }
    }

    /// Create a TypeError
    pub fn type_error(message: impl Into<String>) -> Self {
        JsError::new(ErrorKind::TypeError, message)
    }

    /// Create a ReferenceError
    pub fn reference_error(message: impl Into<String>) -> Self {
        JsError::new(ErrorKind::ReferenceError, message)
    }

    /// Create a RangeError
    pub fn range_error(message: impl Into<String>) -> Self {
        JsError::new(ErrorKind::RangeError, message)
    }

    /// Create an InternalError
    pub fn internal(message: impl Into<String>) -> Self {
        JsError::new(ErrorKind::InternalError, message)
    }

    /// Create a DOM exception with the given code
    pub fn dom_exception(code: u16, message: impl Into<String>) -> Self {
        JsError::new(ErrorKind::DomException(code), message)
    }
}

/// Result type for scripted operations
pub type JsResult<T> = Result<T, JsError>;

/// A static table listing that cannot be turned into a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two entries share a name
    #[error("duplicate property name `{0}`")]
    DuplicateName(String),
    /// The `FUNCTION` bit disagrees with the entry's value variant
    #[error("property `{0}` carries the FUNCTION attribute but has a value token")]
    FunctionFlagMismatch(String),
    /// An entry has an empty name
    #[error("property name must not be empty")]
    EmptyName,
}
