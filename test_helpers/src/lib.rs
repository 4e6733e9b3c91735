//! Test helpers shared across crates.
//!
//! This crate provides scratch build directories and readers for the
//! generated source tree.

pub mod build_dir;
pub mod generated;

pub use build_dir::TempBuildDir;
