//! Field definitions rendered into the generated class.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

/// Type tag whose literals are wrapped in double quotes.
pub const STRING_TYPE: &str = "String";

/// Type tag whose literals are wrapped in single quotes.
pub const CHAR_TYPE: &str = "char";

/// A named, typed literal constant destined for the generated unit.
///
/// `value` is kept verbatim; the emitter decides how to quote it from
/// `field_type` and never checks that the two agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "FieldDeclaration")]
pub struct FieldDefinition {
    field_type: String,
    name: String,
    value: String,
    annotations: Vec<String>,
    documentation: String,
}

impl FieldDefinition {
    /// Creates a field without annotations or documentation.
    #[must_use]
    pub fn new(
        field_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field_type: field_type.into(),
            name: name.into(),
            value: value.into(),
            annotations: Vec::new(),
            documentation: String::new(),
        }
    }

    /// Creates a `String` typed field.
    #[must_use]
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(STRING_TYPE, name, value)
    }

    /// Replaces the annotation snippets, keeping the first occurrence of each.
    #[must_use]
    pub fn with_annotations<I, S>(mut self, annotations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        self.annotations = annotations
            .into_iter()
            .map(Into::into)
            .filter(|annotation| seen.insert(annotation.clone()))
            .collect();
        self
    }

    /// Sets the documentation snippet; an empty string means none.
    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Declared type tag.
    #[must_use]
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    /// Identifier of the constant; the registry key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Literal payload before quoting.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Annotation snippets in declaration order.
    #[must_use]
    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    /// Documentation snippet, if any.
    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        Some(self.documentation.as_str()).filter(|doc| !doc.is_empty())
    }
}

impl fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}/{}/{}>", self.field_type, self.name, self.value)
    }
}

/// Serialised shape of a field in `package.metadata.buildconfig`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDeclaration {
    #[serde(rename = "type")]
    field_type: String,
    name: String,
    value: String,
    #[serde(default)]
    annotations: Vec<String>,
    #[serde(default)]
    documentation: String,
}

impl From<FieldDeclaration> for FieldDefinition {
    fn from(decl: FieldDeclaration) -> Self {
        Self::new(decl.field_type, decl.name, decl.value)
            .with_annotations(decl.annotations)
            .with_documentation(decl.documentation)
    }
}
