//! Ordered, name-keyed field collection with last-write-wins overrides.
//!
//! Entries keep the position of the first insertion of their name; a later
//! [`FieldRegistry::put`] with the same name swaps the value in place. Each
//! replacement is reported to an [`OverrideObserver`], which logs through
//! `tracing` unless the caller installs its own.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::field::FieldDefinition;

/// Name of the reserved field carrying the project version.
pub const VERSION_FIELD: &str = "VERSION";

/// Name of the reserved field carrying the application name.
pub const NAME_FIELD: &str = "NAME";

/// Details passed to an [`OverrideObserver`] when a field is replaced.
#[derive(Debug, Clone, Copy)]
pub struct FieldOverride<'a> {
    /// Label of the registry reporting the replacement.
    pub label: &'a str,
    /// Entry that was replaced.
    pub previous: &'a FieldDefinition,
    /// Entry that now occupies the same position.
    pub replacement: &'a FieldDefinition,
}

/// Callback invoked whenever [`FieldRegistry::put`] overwrites a field.
pub type OverrideObserver = Arc<dyn Fn(&FieldOverride<'_>) + Send + Sync>;

/// Builds the reserved `VERSION` and `NAME` fields, in that order.
#[must_use]
pub fn reserved_fields(version: &str, app_name: &str) -> [FieldDefinition; 2] {
    [
        FieldDefinition::string(VERSION_FIELD, version),
        FieldDefinition::string(NAME_FIELD, app_name),
    ]
}

/// Insertion-ordered map from field name to [`FieldDefinition`].
pub struct FieldRegistry {
    label: String,
    fields: Vec<FieldDefinition>,
    positions: HashMap<String, usize>,
    observer: OverrideObserver,
}

impl FieldRegistry {
    /// Creates an empty registry whose override diagnostics carry `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_observer(label, default_observer())
    }

    /// Creates an empty registry reporting overrides to `observer`.
    #[must_use]
    pub fn with_observer(label: impl Into<String>, observer: OverrideObserver) -> Self {
        Self {
            label: label.into(),
            fields: Vec::new(),
            positions: HashMap::new(),
            observer,
        }
    }

    /// Inserts `field`, replacing any entry with the same name in place.
    pub fn put(&mut self, field: FieldDefinition) {
        let existing = self
            .positions
            .get(field.name())
            .and_then(|&index| self.fields.get_mut(index));
        if let Some(slot) = existing {
            (self.observer)(&FieldOverride {
                label: &self.label,
                previous: slot,
                replacement: &field,
            });
            *slot = field;
            return;
        }
        self.positions
            .insert(field.name().to_owned(), self.fields.len());
        self.fields.push(field);
    }

    /// Inserts every field in order, applying the override rule to each.
    pub fn extend<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = FieldDefinition>,
    {
        for field in fields {
            self.put(field);
        }
    }

    /// Returns `reserved` followed by this registry's fields.
    ///
    /// Both sets pass through the same override rule, so a user field that
    /// shares a reserved name keeps the reserved position and carries the
    /// user value.
    #[must_use]
    pub fn merged<I>(&self, reserved: I) -> Vec<FieldDefinition>
    where
        I: IntoIterator<Item = FieldDefinition>,
    {
        let mut merged = Self::with_observer(self.label.clone(), Arc::clone(&self.observer));
        merged.extend(reserved);
        merged.extend(self.fields.iter().cloned());
        merged.into_fields()
    }

    /// Current value registered for `name`.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(FieldDefinition::value)
    }

    /// Field registered for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.positions
            .get(name)
            .and_then(|&index| self.fields.get(index))
    }

    /// Fields in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    /// Number of distinct field names.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has been registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the registry, yielding its fields in order.
    #[must_use]
    pub fn into_fields(self) -> Vec<FieldDefinition> {
        self.fields
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("label", &self.label)
            .field("fields", &self.fields)
            .field("observer", &"<observer>")
            .finish()
    }
}

fn default_observer() -> OverrideObserver {
    Arc::new(|change: &FieldOverride<'_>| {
        tracing::debug!(
            registry = %change.label,
            previous = %change.previous,
            replacement = %change.replacement,
            "buildconfig field exists, replacing"
        );
    })
}
