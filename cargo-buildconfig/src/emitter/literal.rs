//! Literal formatting by declared field type.

use crate::field::{CHAR_TYPE, FieldDefinition, STRING_TYPE};

/// Formats the field value as it appears on the right of the `=`.
///
/// Only exact `String` and `char` tags are quoted. Every other type is
/// emitted verbatim, so numeric, boolean and expression literals pass
/// through unchanged.
///
/// # Examples
///
/// ```
/// use cargo_buildconfig::emitter::format_literal;
/// use cargo_buildconfig::field::FieldDefinition;
///
/// assert_eq!(format_literal(&FieldDefinition::new("String", "A", "hello")), "\"hello\"");
/// assert_eq!(format_literal(&FieldDefinition::new("char", "B", "x")), "'x'");
/// assert_eq!(format_literal(&FieldDefinition::new("int", "C", "5")), "5");
/// ```
#[must_use]
pub fn format_literal(field: &FieldDefinition) -> String {
    let value = field.value();
    match field.field_type() {
        STRING_TYPE => format!("\"{value}\""),
        CHAR_TYPE => format!("'{value}'"),
        _ => value.to_owned(),
    }
}
