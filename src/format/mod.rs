//! Attribute formats: per-type value validation and coercion.
//!
//! Every attribute declares a format by name. A format checks one value against
//! the constraints of its attribute definition and may rewrite the value into
//! its canonical form (for example `"TRUE"` becomes `true`). Formats are
//! stateless with respect to individual calls and are shared between threads
//! through the [`FormatRegistry`](crate::schema::FormatRegistry).
//!
//! # Built-in Formats
//!
//! - [`StringFormat`] - text with length bounds and regular expression filters
//! - [`NumberFormat`] - numbers and numeric strings with optional bounds
//! - [`BooleanFormat`] - booleans, boolean tokens and numbers
//! - [`TimestampFormat`] - epoch milliseconds, RFC 3339 and RFC 1123 text
//! - [`GroupFormat`] - nested mappings of child attributes

use std::fmt::Debug;

use serde_json::Value;

use crate::error::{SchemaResult, ValidationError, ValidationResult};
use crate::schema::types::AttributeDefinition;

pub mod boolean;
pub mod group;
pub mod number;
pub mod string;
pub mod timestamp;


pub use boolean::BooleanFormat;
pub use group::GroupFormat;
pub use number::NumberFormat;
pub use string::{FilterSet, StringFormat};
pub use timestamp::TimestampFormat;

/// A named value format that attributes can declare as their `type`.
pub trait AttributeFormat: Debug + Send + Sync {
    /// Registry key of this format.
    fn name(&self) -> &str;

    /// Validate `value` against `attribute`, replacing it with its canonical
    /// representation on success.
    ///
    /// Implementations must reject definitions whose declared format is not
    /// their own; [`ensure_format`] does this.
    fn validate(&self, attribute: &AttributeDefinition, value: &mut Value) -> ValidationResult<()>;

    /// Format-specific checks of an attribute definition at schema time.
    ///
    /// `attribute` is the normalized copy being built, so a format may attach
    /// derived state to it (the string format stores its compiled filters).
    fn check_definition(&self, _attribute: &mut AttributeDefinition, _path: &str) -> SchemaResult<()> {
        Ok(())
    }
}

/// Reject a definition that declares a format other than `expected`.
pub fn ensure_format(expected: &str, attribute: &AttributeDefinition) -> ValidationResult<()> {
    if attribute.format != expected {
        return Err(ValidationError::FormatMismatch {
            attribute: attribute.label().to_string(),
            expected: expected.to_string(),
            declared: attribute.format.clone(),
        });
    }
    Ok(())
}

/// `null` and the empty string count as "no value".
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Outcome for a blank value: an error when required, otherwise accepted as-is
/// with every other constraint skipped.
pub fn blank_value(attribute: &AttributeDefinition) -> ValidationResult<()> {
    if attribute.required {
        return Err(ValidationError::missing_required(attribute.label()));
    }
    Ok(())
}

/// Get the type name of a JSON value for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "decimal",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
