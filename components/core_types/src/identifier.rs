//! Property names and the name hash.
//!
//! Static tables and identifiers hash names with the same function over
//! UTF-16 code units, so a scanned `&[u16]` token and an [`Identifier`]
//! with the same text always land in the same bucket.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Seed for the name hash (the golden ratio).
const HASH_SEED: u32 = 0x9e37_79b9;

/// Hash a sequence of UTF-16 code units.
///
/// This is the incremental "super fast hash": two code units are mixed per
/// round, an odd trailing unit gets its own round, and a final avalanche
/// spreads the bits. Zero is reserved, so a zero result becomes
/// `0x8000_0000`.
///
/// # Examples
///
/// ```
/// use core_types::{hash_code_units, hash_str};
///
/// let units: Vec<u16> = "slice".encode_utf16().collect();
/// assert_eq!(hash_code_units(units.iter().copied()), hash_str("slice"));
/// assert_ne!(hash_str(""), 0);
/// ```
pub fn hash_code_units<I>(units: I) -> u32
where
    I: IntoIterator<Item = u16>,
{
    let mut hash = HASH_SEED;
    let mut units = units.into_iter();

    loop {
        match (units.next(), units.next()) {
            (Some(first), Some(second)) => {
                hash = hash.wrapping_add(u32::from(first));
                let tmp = (u32::from(second) << 11) ^ hash;
                hash = (hash << 16) ^ tmp;
                hash = hash.wrapping_add(hash >> 11);
            }
            (Some(last), None) => {
                hash = hash.wrapping_add(u32::from(last));
                hash ^= hash << 11;
                hash = hash.wrapping_add(hash >> 17);
                break;
            }
            _ => break,
        }
    }

    hash ^= hash << 3;
    hash = hash.wrapping_add(hash >> 5);
    hash ^= hash << 2;
    hash = hash.wrapping_add(hash >> 15);
    hash ^= hash << 10;

    if hash == 0 {
        hash = 0x8000_0000;
    }
    hash
}

/// Hash a string by its UTF-16 code units.
pub fn hash_str(name: &str) -> u32 {
    hash_code_units(name.encode_utf16())
}

/// A property name.
///
/// Clones share one allocation, so comparing two clones of the same
/// identifier is a pointer check. Distinct allocations fall back to the
/// cached hash and then the text.
///
/// # Examples
///
/// ```
/// use core_types::Identifier;
///
/// let a = Identifier::new("appendChild");
/// let b = a.clone();
/// let c = Identifier::from("appendChild");
///
/// assert!(a.ptr_eq(&b));
/// assert!(!a.ptr_eq(&c));
/// assert_eq!(a, c);
/// ```
#[derive(Clone)]
pub struct Identifier {
    name: Rc<str>,
    hash: u32,
}

impl Identifier {
    /// Create an identifier, computing its hash.
    pub fn new(name: &str) -> Self {
        Identifier {
            name: Rc::from(name),
            hash: hash_str(name),
        }
    }

    /// The name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The cached name hash.
    #[inline]
    pub fn hash_code(&self) -> u32 {
        self.hash
    }

    /// Returns true when both identifiers share one allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Identifier) -> bool {
        Rc::ptr_eq(&self.name, &other.name)
    }

    /// Returns true for the empty name.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.hash == other.hash && self.name == other.name)
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identifier").field(&&*self.name).finish()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::new(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        let hash = hash_str(&name);
        Identifier {
            name: Rc::from(name),
            hash,
        }
    }
}
