//! Shared helpers for `cargo-buildconfig` integration tests.

use std::error::Error;
use std::process::{Command, Output};

use camino::{Utf8Path, Utf8PathBuf};

/// Resolves the compiled `cargo-buildconfig` binary path from test
/// environment variables.
///
/// # Errors
///
/// Returns an error when none of the supported cargo/nextest binary
/// environment variables are present.
pub(crate) fn cargo_buildconfig_exe() -> Result<Utf8PathBuf, Box<dyn Error>> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_cargo-buildconfig") {
        return Ok(Utf8PathBuf::from(path));
    }
    let env_vars = [
        "CARGO_BIN_EXE_cargo-buildconfig",
        "CARGO_BIN_EXE_cargo_buildconfig",
        "NEXTEST_BIN_EXE_cargo-buildconfig",
        "NEXTEST_BIN_EXE_cargo_buildconfig",
    ];
    for var in env_vars {
        if let Ok(path) = std::env::var(var) {
            return Ok(Utf8PathBuf::from(path));
        }
    }
    Err("cargo-buildconfig binary path not found in environment".into())
}

/// Manifest of the fixture crate carrying `package.metadata.buildconfig`.
pub(crate) fn fixture_manifest() -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/fixtures/buildconfig_fixture/Cargo.toml")
}

/// Runs the binary against the fixture, writing below `build_dir`.
///
/// # Errors
///
/// Returns an error if the binary cannot be located or spawned.
pub(crate) fn run_buildconfig(
    build_dir: &Utf8Path,
    args: &[&str],
) -> Result<Output, Box<dyn Error>> {
    let exe = cargo_buildconfig_exe()?;
    let output = Command::new(exe.as_str())
        .arg("--manifest-path")
        .arg(fixture_manifest().as_str())
        .arg("--package")
        .arg("buildconfig_fixture")
        .arg("--build-dir")
        .arg(build_dir.as_str())
        .args(args)
        .output()?;
    Ok(output)
}
