//! Unit tests for static_lookup component

#[path = "../common/fixtures.rs"]
mod fixtures;

mod dispatch_tests;
mod put_tests;
