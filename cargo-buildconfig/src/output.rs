//! Output layout for generated sources.
//!
//! Generated units live at
//! `<build-dir>/buildConfigSources/<source-set>/<ClassName>.java`.

use std::io::BufWriter;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::{Dir, File, OpenOptions};

use crate::error::BuildConfigError;

/// Folder below the build directory that holds every source set's output.
pub const SOURCE_OUTPUT_DIR: &str = "buildConfigSources";

/// Extension of the emitted compilation unit.
pub const SOURCE_EXTENSION: &str = "java";

/// Directory holding the generated unit for `source_set`.
#[must_use]
pub fn source_set_dir(build_dir: &Utf8Path, source_set: &str) -> Utf8PathBuf {
    build_dir.join(SOURCE_OUTPUT_DIR).join(source_set)
}

/// File name of the generated unit for `class_name`.
#[must_use]
pub fn source_file_name(class_name: &str) -> String {
    format!("{class_name}.{SOURCE_EXTENSION}")
}

/// Checks that `value` names exactly one entry inside its parent.
///
/// `kind` labels the value in the returned error.
///
/// # Errors
///
/// Returns [`BuildConfigError::InvalidPathComponent`] when `value` is empty,
/// is `.` or `..`, or contains a path separator.
pub fn check_path_component(kind: &'static str, value: &str) -> Result<(), BuildConfigError> {
    let has_separator = value.contains(['/', '\\']);
    if value.is_empty() || value == "." || value == ".." || has_separator {
        return Err(BuildConfigError::InvalidPathComponent {
            kind,
            value: value.to_owned(),
        });
    }
    Ok(())
}

/// Creates `file_name` inside `dir`, truncating any previous content.
///
/// # Errors
///
/// Returns [`BuildConfigError::Io`] if the file cannot be opened for writing.
pub fn create_source_file(
    dir: &Dir,
    dir_path: &Utf8Path,
    file_name: &str,
) -> Result<BufWriter<File>, BuildConfigError> {
    dir.open_with(
        file_name,
        OpenOptions::new().write(true).create(true).truncate(true),
    )
    .map(BufWriter::new)
    .map_err(|io_err| BuildConfigError::Io {
        path: dir_path.join(file_name),
        source: io_err,
    })
}
