//! Library interface for `cargo-buildconfig`.
//!
//! Generates a single constants-only `BuildConfig` class per source set.
//! [`registry::FieldRegistry`] merges the reserved `VERSION` and `NAME`
//! fields with user fields under a last-write-wins rule, and
//! [`emitter::SourceEmitter`] writes the unit in a fixed order with
//! type-aware literal quoting.

pub mod emitter;
pub mod error;
pub mod field;
pub mod fs_helpers;
pub mod generate;
pub mod output;
pub mod registry;
