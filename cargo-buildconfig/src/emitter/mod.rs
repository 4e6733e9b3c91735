//! Sequential writer for the generated `BuildConfig` compilation unit.
//!
//! A [`SourceEmitter`] accepts an optional package declaration, exactly one
//! class declaration, any number of fields, and is then closed. Calls made
//! out of that order fail with [`BuildConfigError::InvalidSequence`]. The
//! sink is released on [`SourceEmitter::close`], or on drop if the caller
//! returns early.

mod literal;

pub use literal::format_literal;

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::BuildConfigError;
use crate::field::FieldDefinition;

const INDENT: &str = "   ";
const GENERATED_MARKER: &str = "/** DO NOT EDIT. GENERATED CODE */";

/// Progress of a [`SourceEmitter`] through the compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    /// Nothing written yet.
    Empty,
    /// A package declaration has been written.
    HasPackage,
    /// The class block is open; fields may follow.
    HasClass,
    /// The sink has been released.
    Closed,
}

/// Writes a constants-only class to `W`.
pub struct SourceEmitter<W: Write> {
    sink: Option<W>,
    target: Utf8PathBuf,
    state: EmitterState,
}

impl<W: Write> SourceEmitter<W> {
    /// Wraps `sink`; `target` names the destination in I/O errors.
    #[must_use]
    pub fn new(sink: W, target: &Utf8Path) -> Self {
        Self {
            sink: Some(sink),
            target: target.to_path_buf(),
            state: EmitterState::Empty,
        }
    }

    /// Current position in the write sequence.
    #[must_use]
    pub const fn state(&self) -> EmitterState {
        self.state
    }

    /// Emits `package <pkg>;` followed by a blank line.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildConfigError::InvalidSequence`] once the class or a
    /// previous package has been written, and with [`BuildConfigError::Io`]
    /// if the sink rejects the write.
    pub fn write_package(&mut self, package: &str) -> Result<&mut Self, BuildConfigError> {
        match self.state {
            EmitterState::Empty => {}
            EmitterState::HasPackage => {
                return Err(BuildConfigError::InvalidSequence(
                    "cannot write package twice",
                ));
            }
            EmitterState::HasClass => {
                return Err(BuildConfigError::InvalidSequence(
                    "cannot write package if class is already written",
                ));
            }
            EmitterState::Closed => return Err(closed()),
        }
        self.emit(&format!("package {package};\n\n"))?;
        self.state = EmitterState::HasPackage;
        Ok(self)
    }

    /// Emits the package declaration when one is configured.
    ///
    /// # Errors
    ///
    /// Same as [`Self::write_package`] when `package` is `Some`.
    pub fn write_package_opt(
        &mut self,
        package: Option<&str>,
    ) -> Result<&mut Self, BuildConfigError> {
        match package {
            Some(pkg) => self.write_package(pkg),
            None => Ok(self),
        }
    }

    /// Opens `public final class <name>` with a private constructor.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildConfigError::InvalidSequence`] when a class was
    /// already written or the emitter is closed.
    pub fn write_class(&mut self, name: &str) -> Result<&mut Self, BuildConfigError> {
        match self.state {
            EmitterState::Empty | EmitterState::HasPackage => {}
            EmitterState::HasClass => {
                return Err(BuildConfigError::InvalidSequence(
                    "cannot write class if class is already written",
                ));
            }
            EmitterState::Closed => return Err(closed()),
        }
        self.emit(&format!(
            "{GENERATED_MARKER}\npublic final class {name}\n{{\n{INDENT}private {name} () {{ /* no instance */ }}\n\n"
        ))?;
        self.state = EmitterState::HasClass;
        Ok(self)
    }

    /// Emits one `public static final` constant with its doc and annotations.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildConfigError::InvalidSequence`] before the class has
    /// been written or after close.
    pub fn write_field(&mut self, field: &FieldDefinition) -> Result<&mut Self, BuildConfigError> {
        match self.state {
            EmitterState::HasClass => {}
            EmitterState::Empty | EmitterState::HasPackage => {
                return Err(BuildConfigError::InvalidSequence(
                    "cannot write class field if class is not written",
                ));
            }
            EmitterState::Closed => return Err(closed()),
        }
        self.emit(&render_field(field))?;
        Ok(self)
    }

    /// Closes the class block if one was opened and releases the sink.
    ///
    /// Calling `close` again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BuildConfigError::Io`] if the closing brace or the final
    /// flush cannot be written. The sink is released either way.
    pub fn close(&mut self) -> Result<(), BuildConfigError> {
        self.release().map(drop)
    }

    /// Closes the emitter and hands back the sink.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildConfigError::InvalidSequence`] if the emitter was
    /// already closed, or with [`BuildConfigError::Io`] on write failure.
    pub fn finish(mut self) -> Result<W, BuildConfigError> {
        self.release()?.ok_or_else(closed)
    }

    fn release(&mut self) -> Result<Option<W>, BuildConfigError> {
        let was_class = self.state == EmitterState::HasClass;
        self.state = EmitterState::Closed;
        let Some(mut sink) = self.sink.take() else {
            return Ok(None);
        };
        let result = if was_class {
            sink.write_all(b"}\n").and_then(|()| sink.flush())
        } else {
            sink.flush()
        };
        result.map_err(|io_err| self.io_error(io_err))?;
        Ok(Some(sink))
    }

    fn emit(&mut self, text: &str) -> Result<(), BuildConfigError> {
        let Some(sink) = self.sink.as_mut() else {
            return Err(closed());
        };
        sink.write_all(text.as_bytes())
            .map_err(|io_err| BuildConfigError::Io {
                path: self.target.clone(),
                source: io_err,
            })
    }

    fn io_error(&self, source: std::io::Error) -> BuildConfigError {
        BuildConfigError::Io {
            path: self.target.clone(),
            source,
        }
    }
}

impl<W: Write> Drop for SourceEmitter<W> {
    fn drop(&mut self) {
        if self.sink.is_some() {
            if let Err(err) = self.release() {
                tracing::warn!(path = %self.target, error = %err, "failed to close generated source");
            }
        }
    }
}

const fn closed() -> BuildConfigError {
    BuildConfigError::InvalidSequence("emitter is already closed")
}

fn render_field(field: &FieldDefinition) -> String {
    let mut text = String::new();
    if let Some(doc) = field.documentation() {
        text.push_str(INDENT);
        text.push_str(doc);
        text.push('\n');
    }
    for annotation in field.annotations() {
        text.push_str(INDENT);
        text.push_str(annotation);
        text.push('\n');
    }
    text.push_str(INDENT);
    text.push_str("public static final ");
    text.push_str(field.field_type());
    text.push(' ');
    text.push_str(field.name());
    text.push_str(" = ");
    text.push_str(&format_literal(field));
    text.push_str(";\n\n");
    text
}

#[cfg(test)]
mod tests;
