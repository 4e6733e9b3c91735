//! Scratch build directories with UTF-8 paths.
//!
//! # Examples
//!
//! ```
//! use buildconfig_test_helpers::TempBuildDir;
//!
//! let build = TempBuildDir::new().expect("create build dir");
//! assert!(build.path().as_std_path().is_dir());
//! ```

use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary build root removed when dropped.
pub struct TempBuildDir {
    path: Utf8PathBuf,
    _dir: TempDir,
}

impl TempBuildDir {
    /// Creates a fresh, empty build root.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|non_utf8| anyhow!("temp dir is not valid UTF-8: {}", non_utf8.display()))?;
        Ok(Self { path, _dir: dir })
    }

    /// Root path of the build directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Output directory for `source_set` below this root.
    #[must_use]
    pub fn source_set_dir(&self, source_set: &str) -> Utf8PathBuf {
        self.path.join("buildConfigSources").join(source_set)
    }
}
