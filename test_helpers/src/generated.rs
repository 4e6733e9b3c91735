//! Readers for generated source trees.

use std::io::Read;

use anyhow::{Context, Result};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

/// Reads `file_name` from `dir` as UTF-8 text.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be opened or read.
pub fn read_generated(dir: &Utf8Path, file_name: &str) -> Result<String> {
    let handle = Dir::open_ambient_dir(dir, ambient_authority())
        .with_context(|| format!("open {dir}"))?;
    let mut file = handle
        .open(file_name)
        .with_context(|| format!("open {dir}/{file_name}"))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("read {dir}/{file_name}"))?;
    Ok(content)
}

/// Lists the entry names directly inside `dir`, sorted.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn list_entries(dir: &Utf8Path) -> Result<Vec<String>> {
    let handle = Dir::open_ambient_dir(dir, ambient_authority())
        .with_context(|| format!("open {dir}"))?;
    let mut names = handle
        .entries()
        .with_context(|| format!("list {dir}"))?
        .map(|entry| Ok(entry?.file_name()?))
        .collect::<Result<Vec<String>>>()?;
    names.sort();
    Ok(names)
}
