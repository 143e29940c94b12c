//! Static property tables.
//!
//! A [`HashTable`] maps property names to [`HashEntry`] descriptors. It is
//! built once from a declarative listing of [`PropertySpec`]s and never
//! mutated afterwards, so one table is shared by every instance of the
//! native type that exposes it.
//!
//! # Layout
//!
//! All entries live in one flat array. Indices `0..=hash_mask` are the
//! primary buckets, indexed by `hash(name) & hash_mask`; indices past the
//! buckets hold overflow entries. Each entry links to the next entry that
//! shares its bucket, so a lookup probes one bucket and then walks a short
//! chain. Unused buckets are empty slots.

use std::fmt;

use core_types::{hash_code_units, hash_str, Attributes, Identifier, TableError};

use crate::exec_state::ExecState;
use crate::object::ObjectRef;

/// Builds the callable object for a method entry.
///
/// Receives the execution context, the entry's declared arity, and the
/// property name the method was looked up under.
pub type FunctionFactory = fn(&mut ExecState, u32, &Identifier) -> ObjectRef;

/// What a table entry resolves to.
#[derive(Clone, Copy)]
pub enum EntryValue {
    /// A data property, identified by a type-specific token
    Token(i32),
    /// A method, materialized on first read by the factory
    Function(FunctionFactory),
}

impl fmt::Debug for EntryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryValue::Token(token) => f.debug_tuple("Token").field(token).finish(),
            EntryValue::Function(_) => write!(f, "Function(..)"),
        }
    }
}

/// One line of a declarative table listing.
///
/// # Examples
///
/// ```
/// use core_types::Attributes;
/// use static_lookup::{EntryValue, PropertySpec};
///
/// let spec = PropertySpec::value("length", 1, Attributes::READ_ONLY);
/// assert!(matches!(spec.value, EntryValue::Token(1)));
/// assert_eq!(spec.arity, 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    /// Property name
    pub name: &'static str,
    /// Token or function factory
    pub value: EntryValue,
    /// Attribute flags
    pub attributes: Attributes,
    /// Declared argument count (methods only)
    pub arity: u32,
}

impl PropertySpec {
    /// A data property resolved through a value token.
    pub const fn value(name: &'static str, token: i32, attributes: Attributes) -> Self {
        PropertySpec {
            name,
            value: EntryValue::Token(token),
            attributes,
            arity: 0,
        }
    }

    /// A method. The `FUNCTION` attribute is added automatically.
    pub const fn function(
        name: &'static str,
        factory: FunctionFactory,
        arity: u32,
        attributes: Attributes,
    ) -> Self {
        PropertySpec {
            name,
            value: EntryValue::Function(factory),
            attributes: attributes.union(Attributes::FUNCTION),
            arity,
        }
    }
}

/// A named property or method descriptor stored in a [`HashTable`].
#[derive(Debug, Clone)]
pub struct HashEntry {
    name: &'static str,
    hash: u32,
    value: EntryValue,
    attributes: Attributes,
    arity: u32,
    next: Option<usize>,
}

impl HashEntry {
    /// The property name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The token or factory this entry resolves to.
    pub fn value(&self) -> EntryValue {
        self.value
    }

    /// The attribute flags, including `FUNCTION` for methods.
    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    /// The declared argument count of a method entry.
    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// Returns true for method entries.
    pub fn is_function(&self) -> bool {
        matches!(self.value, EntryValue::Function(_))
    }

    /// The value token, for data property entries.
    pub fn token(&self) -> Option<i32> {
        match self.value {
            EntryValue::Token(token) => Some(token),
            EntryValue::Function(_) => None,
        }
    }

    /// The function factory, for method entries.
    pub fn function_factory(&self) -> Option<FunctionFactory> {
        match self.value {
            EntryValue::Function(factory) => Some(factory),
            EntryValue::Token(_) => None,
        }
    }

    /// Index of the next entry in the same bucket chain.
    pub fn overflow_link(&self) -> Option<usize> {
        self.next
    }
}

/// Sizing for table construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableLayout {
    /// Desired bucket count; rounded up to a power of two. `None` sizes the
    /// table from its entry count.
    pub bucket_hint: Option<usize>,
}

impl TableLayout {
    /// A layout with an explicit bucket count hint.
    pub fn with_buckets(bucket_hint: usize) -> Self {
        TableLayout {
            bucket_hint: Some(bucket_hint),
        }
    }

    fn bucket_count(&self, entry_count: usize) -> usize {
        self.bucket_hint
            .unwrap_or(entry_count)
            .max(1)
            .next_power_of_two()
    }
}

/// An immutable table of property descriptors.
///
/// # Examples
///
/// ```
/// use core_types::{Attributes, Identifier};
/// use static_lookup::{HashTable, PropertySpec};
///
/// let table = HashTable::new(&[
///     PropertySpec::value("nodeName", 0, Attributes::READ_ONLY),
///     PropertySpec::value("nodeValue", 1, Attributes::empty()),
/// ])
/// .unwrap();
///
/// assert_eq!(table.find_token(&Identifier::new("nodeValue")), Some(1));
/// assert!(table.find_entry(&Identifier::new("missing")).is_none());
/// ```
pub struct HashTable {
    version: u32,
    entries: Vec<Option<HashEntry>>,
    hash_mask: usize,
    len: usize,
}

impl HashTable {
    /// Format version recorded on every table.
    pub const TABLE_VERSION: u32 = 2;

    /// A table with no entries; every lookup misses.
    pub fn empty() -> Self {
        HashTable {
            version: Self::TABLE_VERSION,
            entries: Vec::new(),
            hash_mask: 0,
            len: 0,
        }
    }

    /// Build a table sized from its entry count.
    pub fn new(specs: &[PropertySpec]) -> Result<Self, TableError> {
        Self::with_layout(specs, TableLayout::default())
    }

    /// Build a table with an explicit layout.
    ///
    /// Entries are placed in listing order: an entry whose bucket is free
    /// takes the bucket, otherwise it is appended to the overflow region
    /// and linked to the tail of its bucket's chain.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] for empty or duplicate names, and for a
    /// token entry that claims the `FUNCTION` attribute.
    pub fn with_layout(specs: &[PropertySpec], layout: TableLayout) -> Result<Self, TableError> {
        let bucket_count = layout.bucket_count(specs.len());
        let hash_mask = bucket_count - 1;
        let mut entries: Vec<Option<HashEntry>> = vec![None; bucket_count];

        for spec in specs {
            let entry = Self::entry_from_spec(spec)?;
            let bucket = entry.hash as usize & hash_mask;

            if entries[bucket].is_none() {
                entries[bucket] = Some(entry);
                continue;
            }

            let mut index = bucket;

            // Walk to the chain tail, rejecting duplicates on the way
            loop {
                let Some(current) = entries[index].as_ref() else {
                    break;
                };
                if current.name == entry.name {
                    return Err(TableError::DuplicateName(entry.name.to_string()));
                }
                match current.next {
                    Some(next) => index = next,
                    None => break,
                }
            }

            let overflow = entries.len();
            entries.push(Some(entry));
            if let Some(tail) = entries[index].as_mut() {
                tail.next = Some(overflow);
            }
        }

        let table = HashTable {
            version: Self::TABLE_VERSION,
            entries,
            hash_mask,
            len: specs.len(),
        };
        log::trace!(
            "built hash table: {} entries, {} buckets, {} overflow",
            table.len,
            table.bucket_count(),
            table.overflow_count()
        );
        Ok(table)
    }

    /// Build a table from a listing known at compile time.
    ///
    /// Intended for `Lazy` statics: a static listing that does not form a
    /// valid table is a programming error.
    ///
    /// # Panics
    ///
    /// Panics, naming `table_name`, if the listing is rejected.
    pub fn from_static_listing(table_name: &str, specs: &[PropertySpec]) -> Self {
        match Self::new(specs) {
            Ok(table) => {
                log::debug!(
                    "static table {}: {} entries in {} buckets",
                    table_name,
                    table.len(),
                    table.bucket_count()
                );
                table
            }
            Err(error) => panic!("invalid static table {}: {}", table_name, error),
        }
    }

    /// Move the table to static storage.
    ///
    /// Tables live for the rest of the process, which is what slots and
    /// resolvers borrowing `&'static` entries rely on.
    pub fn leak(self) -> &'static HashTable {
        Box::leak(Box::new(self))
    }

    fn entry_from_spec(spec: &PropertySpec) -> Result<HashEntry, TableError> {
        if spec.name.is_empty() {
            return Err(TableError::EmptyName);
        }
        let attributes = match spec.value {
            EntryValue::Function(_) => spec.attributes | Attributes::FUNCTION,
            EntryValue::Token(_) if spec.attributes.is_function() => {
                return Err(TableError::FunctionFlagMismatch(spec.name.to_string()));
            }
            EntryValue::Token(_) => spec.attributes,
        };
        Ok(HashEntry {
            name: spec.name,
            hash: hash_str(spec.name),
            value: spec.value,
            attributes,
            arity: spec.arity,
            next: None,
        })
    }

    fn find_by<F>(&self, hash: u32, matches: F) -> Option<&HashEntry>
    where
        F: Fn(&HashEntry) -> bool,
    {
        let bucket = hash as usize & self.hash_mask;
        let mut entry = self.entries.get(bucket)?.as_ref()?;
        loop {
            if entry.hash == hash && matches(entry) {
                return Some(entry);
            }
            entry = self.entries.get(entry.next?)?.as_ref()?;
        }
    }

    /// Find the entry for an identifier.
    pub fn find_entry(&self, name: &Identifier) -> Option<&HashEntry> {
        self.find_by(name.hash_code(), |entry| entry.name == name.as_str())
    }

    /// Find the entry for a raw UTF-16 buffer, such as a scanned token that
    /// has not been turned into an identifier.
    pub fn find_entry_chars(&self, chars: &[u16]) -> Option<&HashEntry> {
        let hash = hash_code_units(chars.iter().copied());
        self.find_by(hash, |entry| {
            entry.name.encode_utf16().eq(chars.iter().copied())
        })
    }

    /// Find the entry for a string slice.
    pub fn find_entry_str(&self, name: &str) -> Option<&HashEntry> {
        self.find_by(hash_str(name), |entry| entry.name == name)
    }

    /// The token of a data property entry.
    pub fn find_token(&self, name: &Identifier) -> Option<i32> {
        self.find_entry(name)?.token()
    }

    /// The token of a data property entry named by a raw UTF-16 buffer.
    pub fn find_token_chars(&self, chars: &[u16]) -> Option<i32> {
        self.find_entry_chars(chars)?.token()
    }

    /// Iterate every populated entry, buckets first, then overflow.
    pub fn iter(&self) -> impl Iterator<Item = &HashEntry> {
        self.entries.iter().flatten()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slots in the backing array, including empty buckets.
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of primary buckets.
    pub fn bucket_count(&self) -> usize {
        if self.entries.is_empty() {
            0
        } else {
            self.hash_mask + 1
        }
    }

    /// Number of entries stored in the overflow region.
    pub fn overflow_count(&self) -> usize {
        self.entries.len() - self.bucket_count()
    }

    /// `bucket_count - 1`.
    pub fn hash_mask(&self) -> usize {
        self.hash_mask
    }

    /// Format version.
    pub fn version(&self) -> u32 {
        self.version
    }
}

impl fmt::Debug for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("version", &self.version)
            .field("len", &self.len)
            .field("buckets", &self.bucket_count())
            .field("overflow", &self.overflow_count())
            .finish()
    }
}

/// Define an accessor for a static table built on first use.
///
/// The accessor has the `fn() -> &'static HashTable` shape the generic
/// resolvers take. An invalid listing panics on first access, naming the
/// accessor.
///
/// # Examples
///
/// ```
/// use core_types::Attributes;
/// use static_lookup::{static_hash_table, PropertySpec};
///
/// static_hash_table! {
///     fn keyword_table = [
///         PropertySpec::value("if", 1, Attributes::empty()),
///         PropertySpec::value("else", 2, Attributes::empty()),
///     ]
/// }
///
/// assert_eq!(keyword_table().find_entry_str("else").and_then(|e| e.token()), Some(2));
/// assert!(std::ptr::eq(keyword_table(), keyword_table()));
/// ```
#[macro_export]
macro_rules! static_hash_table {
    ($(#[$meta:meta])* $vis:vis fn $accessor:ident = [$($spec:expr),* $(,)?]) => {
        $(#[$meta])*
        $vis fn $accessor() -> &'static $crate::HashTable {
            static TABLE: $crate::__private::Lazy<$crate::HashTable> = $crate::__private::Lazy::new(|| {
                $crate::HashTable::from_static_listing(stringify!($accessor), &[$($spec),*])
            });
            &TABLE
        }
    };
}
