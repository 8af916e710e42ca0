//! The `group` format.

use serde_json::Value;

use super::{AttributeFormat, blank_value, ensure_format, is_blank, value_kind};
use crate::error::{ValidationError, ValidationResult};
use crate::schema::types::{AttributeDefinition, GROUP_FORMAT};

/// Gate check for group values: the value must be a mapping.
///
/// The fields of the mapping are validated against the group's children by
/// the record walker, not by this format.
#[derive(Debug, Default, Clone, Copy)]
pub struct GroupFormat;

impl GroupFormat {
    pub const NAME: &'static str = GROUP_FORMAT;
}

impl AttributeFormat for GroupFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, attribute: &AttributeDefinition, value: &mut Value) -> ValidationResult<()> {
        ensure_format(Self::NAME, attribute)?;

        if is_blank(value) {
            return blank_value(attribute);
        }

        if !value.is_object() {
            return Err(ValidationError::invalid_type(
                attribute.label(),
                "group",
                value_kind(value),
            ));
        }

        Ok(())
    }
}
