//! Filesystem helpers shared across `cargo-buildconfig` modules.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::BuildConfigError;

/// Opens a directory if it exists, returning `None` when the path is missing.
///
/// # Errors
///
/// Returns [`BuildConfigError::Io`] for any failure other than a missing path.
pub fn open_optional_dir(path: &Utf8Path) -> Result<Option<Dir>, BuildConfigError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(Some(dir)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_error(path, err)),
    }
}

/// Ensures a directory exists and returns a handle to it.
///
/// # Errors
///
/// Returns [`BuildConfigError::Io`] if the directory cannot be created or
/// opened.
pub fn ensure_dir(path: &Utf8Path) -> Result<Dir, BuildConfigError> {
    if let Some(dir) = open_optional_dir(path)? {
        return Ok(dir);
    }
    Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|err| io_error(path, err))?;
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|err| io_error(path, err))
}

/// Removes `path` and everything below it, then recreates it empty.
///
/// # Errors
///
/// Returns [`BuildConfigError::Io`] if the existing tree cannot be removed or
/// the directory cannot be recreated.
pub fn recreate_dir(path: &Utf8Path) -> Result<Dir, BuildConfigError> {
    if let Some(existing) = open_optional_dir(path)? {
        existing
            .remove_open_dir_all()
            .map_err(|err| io_error(path, err))?;
    }
    ensure_dir(path)
}

fn io_error(path: &Utf8Path, source: std::io::Error) -> BuildConfigError {
    BuildConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}
