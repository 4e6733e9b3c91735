//! Error types for `cargo-buildconfig`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `cargo-buildconfig` pipeline.
#[derive(Debug, Error)]
pub enum BuildConfigError {
    /// An emitter operation was invoked out of order.
    #[error("invalid emitter sequence: {0}")]
    InvalidSequence(&'static str),

    /// `cargo metadata` could not be executed or parsed.
    #[error("cargo metadata failed: {0}")]
    Metadata(#[from] cargo_metadata::Error),

    /// The `package.metadata.buildconfig` table did not match the schema.
    #[error("failed to parse package.metadata.buildconfig: {0}")]
    MetadataJson(#[from] serde_json::Error),

    /// The requested package is not part of the workspace.
    #[error("package '{0}' not found in workspace")]
    PackageNotFound(String),

    /// No `--package` was given and the workspace is virtual.
    #[error("workspace root package was not available; pass --package")]
    WorkspaceRootMissing,

    /// A `--source-set` filter named a set that has no configuration.
    #[error("source set '{0}' is not configured")]
    SourceSetNotFound(String),

    /// A source set or class name is not a single plain path component.
    #[error("invalid {kind} '{value}'; expected a single path component")]
    InvalidPathComponent {
        /// Which request value was rejected.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A `--field` argument could not be split into its three parts.
    #[error("invalid field '{0}'; expected TYPE:NAME:VALUE")]
    InvalidFieldSpec(String),

    /// Clearing, creating or writing generated output failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being operated on.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
