//! Shared leaf types for the static property lookup layer.
//!
//! This crate provides the small vocabulary every other component speaks:
//! property names, property attribute bits, the name hash, and the error
//! taxonomy used by host-object getters, setters, and native functions.
//!
//! # Overview
//!
//! - [`Identifier`] - Property name with its hash computed once
//! - [`Attributes`] - Property flag bits (`READ_ONLY`, `FUNCTION`, ...)
//! - [`hash_code_units`] - The name hash shared by tables and identifiers
//! - [`JsError`] / [`ErrorKind`] - Scripted exceptions thrown by host code
//! - [`TableError`] - Malformed static table listings
//!
//! # Examples
//!
//! ```
//! use core_types::{Attributes, ErrorKind, Identifier, JsError};
//!
//! let name = Identifier::new("length");
//! assert_eq!(name.as_str(), "length");
//!
//! let attrs = Attributes::READ_ONLY | Attributes::DONT_ENUM;
//! assert!(attrs.is_read_only());
//!
//! let error = JsError::type_error("undefined is not a function");
//! assert_eq!(error.kind, ErrorKind::TypeError);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod attributes;
mod error;
mod identifier;

pub use attributes::Attributes;
pub use error::{ErrorKind, JsError, JsResult, TableError};
pub use identifier::{hash_code_units, hash_str, Identifier};
