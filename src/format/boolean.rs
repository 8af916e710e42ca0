//! The `boolean` format.

use serde_json::Value;

use super::{AttributeFormat, blank_value, ensure_format, is_blank, value_kind};
use crate::error::{ValidationError, ValidationResult};
use crate::schema::types::AttributeDefinition;

const TRUE_TOKENS: &[&str] = &["true", "t", "yes", "y", "on", "1"];
const FALSE_TOKENS: &[&str] = &["false", "f", "no", "n", "off", "0"];

/// Native booleans, case-insensitive boolean tokens, or numbers (positive is
/// `true`, zero and negative are `false`). Values are coerced to booleans.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanFormat;

impl BooleanFormat {
    pub const NAME: &'static str = "boolean";
}

fn parse_token(text: &str) -> Option<bool> {
    let token = text.trim().to_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Some(true)
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Some(false)
    } else {
        None
    }
}

impl AttributeFormat for BooleanFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, attribute: &AttributeDefinition, value: &mut Value) -> ValidationResult<()> {
        ensure_format(Self::NAME, attribute)?;

        if is_blank(value) {
            return blank_value(attribute);
        }

        let flag = match value {
            Value::Bool(flag) => *flag,
            Value::String(text) => {
                parse_token(text).ok_or_else(|| ValidationError::InvalidBoolean {
                    attribute: attribute.label().to_string(),
                    value: text.clone(),
                })?
            }
            Value::Number(n) => n.as_f64().is_some_and(|n| n > 0.0),
            other => {
                return Err(ValidationError::invalid_type(
                    attribute.label(),
                    "boolean",
                    value_kind(other),
                ));
            }
        };

        *value = Value::Bool(flag);
        Ok(())
    }
}
