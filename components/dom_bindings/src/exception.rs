//! DOM exception codes.

use core_types::JsError;
use thiserror::Error;

/// A DOM operation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomException {
    /// Index or size is negative or too large
    #[error("INDEX_SIZE_ERR: index or size out of range")]
    IndexSize,
    /// The node cannot be inserted at this point in the tree
    #[error("HIERARCHY_REQUEST_ERR: node cannot be inserted here")]
    HierarchyRequest,
    /// The node belongs to another document
    #[error("WRONG_DOCUMENT_ERR: node belongs to another document")]
    WrongDocument,
    /// A name contains an invalid character
    #[error("INVALID_CHARACTER_ERR: invalid character in name")]
    InvalidCharacter,
    /// The node is read-only
    #[error("NO_MODIFICATION_ALLOWED_ERR: node is read-only")]
    NoModificationAllowed,
    /// The referenced node does not exist in this context
    #[error("NOT_FOUND_ERR: node not found")]
    NotFound,
}

impl DomException {
    /// Every exception, in code order.
    pub const ALL: [DomException; 6] = [
        DomException::IndexSize,
        DomException::HierarchyRequest,
        DomException::WrongDocument,
        DomException::InvalidCharacter,
        DomException::NoModificationAllowed,
        DomException::NotFound,
    ];

    /// The numeric code exposed to scripts.
    pub fn code(self) -> u16 {
        match self {
            DomException::IndexSize => 1,
            DomException::HierarchyRequest => 3,
            DomException::WrongDocument => 4,
            DomException::InvalidCharacter => 5,
            DomException::NoModificationAllowed => 7,
            DomException::NotFound => 8,
        }
    }

    /// The constant name, e.g. `NOT_FOUND_ERR`.
    pub fn name(self) -> &'static str {
        match self {
            DomException::IndexSize => "INDEX_SIZE_ERR",
            DomException::HierarchyRequest => "HIERARCHY_REQUEST_ERR",
            DomException::WrongDocument => "WRONG_DOCUMENT_ERR",
            DomException::InvalidCharacter => "INVALID_CHARACTER_ERR",
            DomException::NoModificationAllowed => "NO_MODIFICATION_ALLOWED_ERR",
            DomException::NotFound => "NOT_FOUND_ERR",
        }
    }
}

impl From<DomException> for JsError {
    fn from(exception: DomException) -> Self {
        JsError::dom_exception(exception.code(), exception.to_string())
    }
}
