//! Command-line interface definitions for `cargo-buildconfig`.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use cargo_buildconfig::error::BuildConfigError;
use cargo_buildconfig::field::FieldDefinition;
use clap::Parser;

/// Parsed CLI arguments for `cargo-buildconfig`.
#[derive(Debug, Parser)]
#[command(name = "cargo-buildconfig")]
#[command(about = "Generate BuildConfig constant classes from Cargo metadata")]
#[command(version)]
pub struct Args {
    /// Path to the `Cargo.toml` to read metadata from.
    #[arg(long, value_name = "path")]
    pub manifest_path: Option<Utf8PathBuf>,
    /// Cargo package whose metadata configures generation.
    #[arg(long)]
    pub package: Option<String>,
    /// Restrict generation to these source sets (repeatable).
    #[arg(long = "source-set", value_name = "name")]
    pub source_sets: Vec<String>,
    /// Build output root; defaults to the Cargo target directory.
    #[arg(long, value_name = "path")]
    pub build_dir: Option<Utf8PathBuf>,
    /// Package declared by the generated unit.
    #[arg(long, value_name = "package")]
    pub package_name: Option<String>,
    /// Value of the reserved `NAME` field.
    #[arg(long, value_name = "name")]
    pub app_name: Option<String>,
    /// Value of the reserved `VERSION` field.
    #[arg(long = "version-name", value_name = "version")]
    pub version_name: Option<String>,
    /// Name of the generated class.
    #[arg(long, value_name = "name")]
    pub class_name: Option<String>,
    /// Extra field as `TYPE:NAME:VALUE`, applied after metadata fields.
    #[arg(long = "field", value_name = "TYPE:NAME:VALUE")]
    pub fields: Vec<String>,
}

impl Args {
    /// Parses process arguments, tolerating the `buildconfig` token cargo
    /// inserts when the tool runs as `cargo buildconfig`.
    pub fn parse_cargo() -> Self {
        Self::parse_from(strip_cargo_subcommand(std::env::args_os()))
    }

    /// Field overrides given on the command line, in order.
    pub fn parsed_fields(&self) -> Result<Vec<FieldDefinition>, BuildConfigError> {
        self.fields.iter().map(|spec| parse_field_spec(spec)).collect()
    }
}

fn strip_cargo_subcommand<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut collected: Vec<OsString> = args.into_iter().collect();
    if collected.get(1).is_some_and(|arg| arg == "buildconfig") {
        collected.remove(1);
    }
    collected
}

/// Splits `TYPE:NAME:VALUE`; the value may itself contain colons.
pub fn parse_field_spec(spec: &str) -> Result<FieldDefinition, BuildConfigError> {
    let mut parts = spec.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(field_type), Some(name), Some(value))
            if !field_type.is_empty() && !name.is_empty() =>
        {
            Ok(FieldDefinition::new(field_type, name, value))
        }
        _ => Err(BuildConfigError::InvalidFieldSpec(spec.to_owned())),
    }
}
