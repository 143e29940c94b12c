//! Unit tests for Identifier and the name hash

use std::collections::HashMap;

use core_types::{hash_code_units, hash_str, Identifier};
use proptest::prelude::*;

#[test]
fn test_identifier_clone_shares_allocation() {
    let a = Identifier::new("textContent");
    let b = a.clone();
    assert!(a.ptr_eq(&b));
    assert_eq!(a.hash_code(), b.hash_code());
}

#[test]
fn test_identifier_as_map_key() {
    let mut map = HashMap::new();
    map.insert(Identifier::new("id"), 1);
    map.insert(Identifier::new("className"), 2);

    assert_eq!(map.get(&Identifier::new("id")), Some(&1));
    assert_eq!(map.get(&Identifier::new("className")), Some(&2));
    assert_eq!(map.get(&Identifier::new("tagName")), None);
}

#[test]
fn test_empty_identifier() {
    let empty = Identifier::new("");
    assert!(empty.is_empty());
    assert_eq!(empty.hash_code(), hash_str(""));
}

#[test]
fn test_non_ascii_names_hash_by_code_units() {
    let name = "caf\u{e9}\u{1f600}";
    let units: Vec<u16> = name.encode_utf16().collect();
    assert_eq!(Identifier::new(name).hash_code(), hash_code_units(units));
}

proptest! {
    #[test]
    fn prop_identifier_hash_matches_buffer_hash(name in "\\PC{0,24}") {
        let units: Vec<u16> = name.encode_utf16().collect();
        prop_assert_eq!(Identifier::new(&name).hash_code(), hash_code_units(units));
    }

    #[test]
    fn prop_equal_text_means_equal_identifiers(name in "[a-zA-Z_$][a-zA-Z0-9_$]{0,16}") {
        let a = Identifier::new(&name);
        let b = Identifier::from(name.clone());
        prop_assert_eq!(a, b);
    }
}
