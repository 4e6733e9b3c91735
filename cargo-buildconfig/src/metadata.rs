//! Cargo metadata discovery and request resolution for `cargo-buildconfig`.
//!
//! Values are layered: CLI flags, then the source set table, then the
//! package-level `[package.metadata.buildconfig]` table, then Cargo's own
//! package name, version and target directory.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use cargo_buildconfig::error::BuildConfigError;
use cargo_buildconfig::field::FieldDefinition;
use cargo_buildconfig::generate::{
    DEFAULT_CLASS_NAME, DEFAULT_PACKAGE_NAME, DEFAULT_SOURCE_SET, GenerationRequest,
};
use cargo_metadata::{Metadata, MetadataCommand, Package};
use serde::Deserialize;

use crate::cli::Args;

/// Deserialised `package.metadata.buildconfig` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfigMetadata {
    /// Package for every source set without its own.
    pub package_name: Option<String>,
    /// `NAME` value for every source set without its own.
    pub app_name: Option<String>,
    /// `VERSION` value for every source set without its own.
    pub version: Option<String>,
    /// Generated class name.
    pub class_name: Option<String>,
    /// Per source set configuration keyed by source set name.
    pub source_sets: BTreeMap<String, SourceSetMetadata>,
}

/// Deserialised `package.metadata.buildconfig.source_sets.<name>` table.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSetMetadata {
    /// Package declared by this source set's unit.
    pub package_name: Option<String>,
    /// `NAME` value for this source set.
    pub app_name: Option<String>,
    /// `VERSION` value for this source set.
    pub version: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDefinition>,
}

/// Summary of the selected package and its generation defaults.
#[derive(Debug)]
pub struct PackageSelection {
    /// Selected Cargo package name.
    pub package_name: String,
    /// Selected Cargo package version.
    pub version: String,
    /// Cargo target directory for build artefacts.
    pub target_directory: Utf8PathBuf,
    /// Parsed `package.metadata.buildconfig` table.
    pub config: BuildConfigMetadata,
}

/// Loads Cargo metadata for the workspace containing `manifest_path`.
pub fn load_metadata(manifest_path: Option<&Utf8Path>) -> Result<Metadata, BuildConfigError> {
    let mut command = MetadataCommand::new();
    command.no_deps();
    if let Some(path) = manifest_path {
        command.manifest_path(path);
    }
    Ok(command.exec()?)
}

/// Selects the target package and parses its buildconfig table.
pub fn select_package(
    metadata: &Metadata,
    args: &Args,
) -> Result<PackageSelection, BuildConfigError> {
    let package = match args.package.as_ref() {
        Some(name) => find_package(metadata, name)?,
        None => metadata
            .root_package()
            .ok_or(BuildConfigError::WorkspaceRootMissing)?,
    };

    Ok(PackageSelection {
        package_name: package.name.clone(),
        version: package.version.to_string(),
        target_directory: metadata.target_directory.clone(),
        config: parse_buildconfig_metadata(package)?,
    })
}

/// Builds one request per selected source set, in source set name order.
pub fn resolve_requests(
    selection: &PackageSelection,
    args: &Args,
) -> Result<Vec<GenerationRequest>, BuildConfigError> {
    let config = &selection.config;
    let cli_fields = args.parsed_fields()?;
    let build_dir = args
        .build_dir
        .clone()
        .unwrap_or_else(|| selection.target_directory.clone());
    let class_name = first_of(&[&args.class_name, &config.class_name])
        .unwrap_or(DEFAULT_CLASS_NAME)
        .to_owned();

    select_source_sets(config, &args.source_sets)?
        .into_iter()
        .map(|(source_set, set)| {
            let mut fields = set.fields;
            fields.extend(cli_fields.iter().cloned());
            Ok(GenerationRequest {
                build_dir: build_dir.clone(),
                package_name: first_of(&[
                    &args.package_name,
                    &set.package_name,
                    &config.package_name,
                ])
                .unwrap_or(DEFAULT_PACKAGE_NAME)
                .to_owned(),
                app_name: first_of(&[&args.app_name, &set.app_name, &config.app_name])
                    .unwrap_or(&selection.package_name)
                    .to_owned(),
                version: first_of(&[&args.version_name, &set.version, &config.version])
                    .unwrap_or(&selection.version)
                    .to_owned(),
                class_name: class_name.clone(),
                source_set,
                fields,
            })
        })
        .collect()
}

fn select_source_sets(
    config: &BuildConfigMetadata,
    filter: &[String],
) -> Result<Vec<(String, SourceSetMetadata)>, BuildConfigError> {
    let mut configured = config.source_sets.clone();
    if configured.is_empty() {
        configured.insert(DEFAULT_SOURCE_SET.to_owned(), SourceSetMetadata::default());
    }
    if filter.is_empty() {
        return Ok(configured.into_iter().collect());
    }

    filter
        .iter()
        .map(|name| {
            configured
                .get(name)
                .map(|set| (name.clone(), set.clone()))
                .ok_or_else(|| BuildConfigError::SourceSetNotFound(name.clone()))
        })
        .collect()
}

fn first_of<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates.iter().find_map(|value| value.as_deref())
}

fn find_package<'a>(metadata: &'a Metadata, name: &str) -> Result<&'a Package, BuildConfigError> {
    metadata
        .packages
        .iter()
        .find(|package| package.name == name)
        .ok_or_else(|| BuildConfigError::PackageNotFound(name.to_owned()))
}

fn parse_buildconfig_metadata(package: &Package) -> Result<BuildConfigMetadata, BuildConfigError> {
    let Some(value) = package.metadata.get("buildconfig") else {
        return Ok(BuildConfigMetadata::default());
    };

    serde_json::from_value(value.clone()).map_err(BuildConfigError::MetadataJson)
}
