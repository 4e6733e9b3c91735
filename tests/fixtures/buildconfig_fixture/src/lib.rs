//! Fixture crate for `cargo-buildconfig` integration tests.
//!
//! Only its `[package.metadata.buildconfig]` table is read.
