//! Property attribute bits.
//!
//! The same bit set is used by static table entries and by the direct
//! property store of every host object.

use bitflags::bitflags;

bitflags! {
    /// Attribute flags carried by a property.
    ///
    /// `FUNCTION` only ever appears on static table entries: it marks an
    /// entry whose value is a function factory rather than a value token.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Attributes;
    ///
    /// let attrs = Attributes::DONT_DELETE | Attributes::FUNCTION;
    /// assert!(attrs.is_function());
    /// assert!(!attrs.is_read_only());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Writes are silently ignored
        const READ_ONLY = 1 << 1;
        /// Hidden from property enumeration
        const DONT_ENUM = 1 << 2;
        /// Refuses deletion
        const DONT_DELETE = 1 << 3;
        /// Reserved for engine-internal properties
        const INTERNAL = 1 << 4;
        /// Entry is a method (function factory), not a data property
        const FUNCTION = 1 << 5;
    }
}

impl Attributes {
    /// Returns true when writes to the property are ignored.
    #[inline]
    pub fn is_read_only(self) -> bool {
        self.contains(Attributes::READ_ONLY)
    }

    /// Returns true when the property is skipped by enumeration.
    #[inline]
    pub fn is_dont_enum(self) -> bool {
        self.contains(Attributes::DONT_ENUM)
    }

    /// Returns true when the property cannot be deleted.
    #[inline]
    pub fn is_dont_delete(self) -> bool {
        self.contains(Attributes::DONT_DELETE)
    }

    /// Returns true for method entries.
    #[inline]
    pub fn is_function(self) -> bool {
        self.contains(Attributes::FUNCTION)
    }
}
