//! The `number` format.

use serde_json::{Number, Value};

use super::{AttributeFormat, blank_value, ensure_format, is_blank, value_kind};
use crate::error::{SchemaError, SchemaResult, ValidationError, ValidationResult};
use crate::schema::types::AttributeDefinition;

/// Native numbers, or strings holding an integer or floating point literal
/// (exponents included). Numeric strings are replaced by JSON numbers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberFormat;

impl NumberFormat {
    pub const NAME: &'static str = "number";
}

fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Number::from(integer));
    }
    text.parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .and_then(Number::from_f64)
}

impl AttributeFormat for NumberFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, attribute: &AttributeDefinition, value: &mut Value) -> ValidationResult<()> {
        ensure_format(Self::NAME, attribute)?;

        if is_blank(value) {
            return blank_value(attribute);
        }

        let number = match value {
            Value::Number(n) => n.clone(),
            Value::String(text) => {
                parse_number(text).ok_or_else(|| ValidationError::InvalidNumber {
                    attribute: attribute.label().to_string(),
                    value: text.clone(),
                })?
            }
            other => {
                return Err(ValidationError::invalid_type(
                    attribute.label(),
                    "number",
                    value_kind(other),
                ));
            }
        };

        let numeric = number.as_f64().ok_or_else(|| ValidationError::InvalidNumber {
            attribute: attribute.label().to_string(),
            value: number.to_string(),
        })?;

        if let Some(min) = attribute.min_value {
            if numeric < min {
                return Err(ValidationError::BelowMinimum {
                    attribute: attribute.label().to_string(),
                    value: numeric,
                    min,
                });
            }
        }
        if let Some(max) = attribute.max_value {
            if numeric > max {
                return Err(ValidationError::AboveMaximum {
                    attribute: attribute.label().to_string(),
                    value: numeric,
                    max,
                });
            }
        }

        *value = Value::Number(number);
        Ok(())
    }

    fn check_definition(&self, attribute: &mut AttributeDefinition, path: &str) -> SchemaResult<()> {
        if let (Some(min), Some(max)) = (attribute.min_value, attribute.max_value) {
            if min > max {
                return Err(SchemaError::invalid_constraint(
                    path,
                    format!("minValue {} is greater than maxValue {}", min, max),
                ));
            }
        }
        Ok(())
    }
}
