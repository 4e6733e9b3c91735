//! One generation request: merge fields, reset the output, emit the unit.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use crate::emitter::SourceEmitter;
use crate::error::BuildConfigError;
use crate::field::FieldDefinition;
use crate::fs_helpers;
use crate::output;
use crate::registry::{FieldRegistry, OverrideObserver, reserved_fields};

/// Source set generated when none is configured.
pub const DEFAULT_SOURCE_SET: &str = "main";

/// Class name of the generated unit.
pub const DEFAULT_CLASS_NAME: &str = "BuildConfig";

/// Package used when neither the source set nor the package declares one.
pub const DEFAULT_PACKAGE_NAME: &str = "buildconfig";

/// Fully resolved inputs for one generated unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Root of build output, usually Cargo's target directory.
    pub build_dir: Utf8PathBuf,
    /// Selects the output subdirectory.
    pub source_set: String,
    /// Package declared at the top of the unit; empty for the default package.
    pub package_name: String,
    /// Value of the reserved `NAME` field.
    pub app_name: String,
    /// Value of the reserved `VERSION` field.
    pub version: String,
    /// Name of the generated class and its file.
    pub class_name: String,
    /// User fields in declaration order; later names win.
    pub fields: Vec<FieldDefinition>,
}

impl GenerationRequest {
    /// Creates a `main` request for `BuildConfig` in the default package.
    #[must_use]
    pub fn new(
        build_dir: impl Into<Utf8PathBuf>,
        app_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            build_dir: build_dir.into(),
            source_set: DEFAULT_SOURCE_SET.to_owned(),
            package_name: DEFAULT_PACKAGE_NAME.to_owned(),
            app_name: app_name.into(),
            version: version.into(),
            class_name: DEFAULT_CLASS_NAME.to_owned(),
            fields: Vec::new(),
        }
    }

    /// Checks that `source_set` and `class_name` each name a single entry, so
    /// the output stays inside its own source-set directory.
    ///
    /// # Errors
    ///
    /// Returns [`BuildConfigError::InvalidPathComponent`] for an empty name,
    /// `.`, `..`, or a name containing a path separator.
    pub fn validate(&self) -> Result<(), BuildConfigError> {
        output::check_path_component("source set", &self.source_set)?;
        output::check_path_component("class name", &self.class_name)
    }

    /// Directory that receives the generated unit.
    #[must_use]
    pub fn output_dir(&self) -> Utf8PathBuf {
        output::source_set_dir(&self.build_dir, &self.source_set)
    }

    /// Path of the generated unit.
    #[must_use]
    pub fn output_file(&self) -> Utf8PathBuf {
        self.output_dir()
            .join(output::source_file_name(&self.class_name))
    }

    /// Label used for tracing spans and override diagnostics.
    ///
    /// `generateBuildConfig` for `main`, otherwise
    /// `generate<SourceSet>BuildConfig` with the first letter capitalised.
    #[must_use]
    pub fn task_name(&self) -> String {
        if self.source_set == DEFAULT_SOURCE_SET {
            return "generateBuildConfig".to_owned();
        }
        let mut chars = self.source_set.chars();
        let capitalised: String = chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect())
            .unwrap_or_default();
        format!("generate{capitalised}BuildConfig")
    }

    /// Reserved fields followed by user fields, after overrides.
    #[must_use]
    pub fn merged_fields(&self, observer: Option<OverrideObserver>) -> Vec<FieldDefinition> {
        let label = self.task_name();
        let mut registry = match observer {
            Some(observer) => FieldRegistry::with_observer(label, observer),
            None => FieldRegistry::new(label),
        };
        registry.extend(self.fields.iter().cloned());
        registry.merged(reserved_fields(&self.version, &self.app_name))
    }
}

/// Generates the unit for `request` and returns the written file path.
///
/// The source-set directory is removed and recreated first, so a second
/// run with the same inputs leaves exactly one byte-identical file.
///
/// # Errors
///
/// Returns [`BuildConfigError::InvalidPathComponent`] before touching the
/// filesystem if the request fails [`GenerationRequest::validate`], and
/// [`BuildConfigError::Io`] if the directory cannot be reset or the file
/// cannot be written.
pub fn generate(request: &GenerationRequest) -> Result<Utf8PathBuf, BuildConfigError> {
    generate_with_observer(request, None)
}

/// [`generate`] with a custom override observer.
///
/// # Errors
///
/// Same as [`generate`].
pub fn generate_with_observer(
    request: &GenerationRequest,
    observer: Option<OverrideObserver>,
) -> Result<Utf8PathBuf, BuildConfigError> {
    let span = tracing::debug_span!("generate", task = %request.task_name());
    let _entered = span.enter();
    request.validate()?;

    let fields = request.merged_fields(observer);
    let out_dir = request.output_dir();
    let file_name = output::source_file_name(&request.class_name);
    let out_file = out_dir.join(&file_name);
    tracing::debug!(dir = %out_dir, fields = fields.len(), "resetting output directory");

    let dir = fs_helpers::recreate_dir(&out_dir)?;
    let sink = output::create_source_file(&dir, &out_dir, &file_name)?;
    emit_unit(sink, &out_file, request, &fields)?;

    tracing::info!(path = %out_file, "generated build config");
    Ok(out_file)
}

/// Renders the unit for `request` without touching the filesystem.
///
/// # Errors
///
/// Fails if the request does not pass [`GenerationRequest::validate`].
pub fn render(request: &GenerationRequest) -> Result<String, BuildConfigError> {
    request.validate()?;
    let fields = request.merged_fields(None);
    let mut buffer = Vec::new();
    emit_unit(&mut buffer, &request.output_file(), request, &fields)?;
    String::from_utf8(buffer).map_err(|err| BuildConfigError::Io {
        path: request.output_file(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
    })
}

fn emit_unit<W: Write>(
    sink: W,
    target: &Utf8Path,
    request: &GenerationRequest,
    fields: &[FieldDefinition],
) -> Result<(), BuildConfigError> {
    let mut emitter = SourceEmitter::new(sink, target);
    let package = Some(request.package_name.as_str()).filter(|pkg| !pkg.is_empty());
    emitter
        .write_package_opt(package)?
        .write_class(&request.class_name)?;
    for field in fields {
        emitter.write_field(field)?;
    }
    emitter.close()
}
