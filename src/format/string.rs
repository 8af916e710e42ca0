//! The `string` format.

use regex::Regex;
use serde_json::Value;

use super::{AttributeFormat, blank_value, ensure_format, is_blank, value_kind};
use crate::error::{SchemaError, SchemaResult, ValidationError, ValidationResult};
use crate::schema::types::AttributeDefinition;

/// Text values with optional length bounds and regular expression filters.
///
/// Lengths are counted in characters and every filter must match the entire
/// value. The format holds no state: compiled filters live on the normalized
/// attribute definition and are dropped with it.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringFormat;

impl StringFormat {
    pub const NAME: &'static str = "string";

    pub fn new() -> Self {
        Self
    }
}

/// Compiled form of an attribute's `filters`, anchored to the whole value.
///
/// Filled in by schema validation. It is never serialized and does not take
/// part in equality, since it is derived from `filters`.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    patterns: Vec<String>,
    regexes: Vec<Regex>,
}

/// A filter pattern that failed to compile.
#[derive(Debug)]
pub struct FilterError {
    pub pattern: String,
    pub source: regex::Error,
}

impl FilterSet {
    /// Compile `patterns`, stopping at the first invalid one.
    pub fn compile(patterns: &[String]) -> Result<Self, FilterError> {
        let regexes = patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| FilterError {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns: patterns.to_vec(),
            regexes,
        })
    }

    /// Whether this set was compiled from exactly `patterns`.
    pub fn compiled_from(&self, patterns: &[String]) -> bool {
        self.patterns == patterns
    }

    pub fn len(&self) -> usize {
        self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }

    /// Index and pattern of the first filter that does not match `text`.
    pub fn first_mismatch(&self, text: &str) -> Option<(usize, &str)> {
        self.regexes
            .iter()
            .zip(&self.patterns)
            .enumerate()
            .find(|(_, (regex, _))| !regex.is_match(text))
            .map(|(index, (_, pattern))| (index, pattern.as_str()))
    }
}

impl PartialEq for FilterSet {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl AttributeFormat for StringFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, attribute: &AttributeDefinition, value: &mut Value) -> ValidationResult<()> {
        ensure_format(Self::NAME, attribute)?;

        if is_blank(value) {
            return blank_value(attribute);
        }

        let text = match value {
            Value::String(text) => text.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(ValidationError::invalid_type(
                    attribute.label(),
                    "string",
                    value_kind(other),
                ));
            }
        };

        let length = text.chars().count();
        if let Some(min) = attribute.min_length {
            if length < min {
                return Err(ValidationError::TooShort {
                    attribute: attribute.label().to_string(),
                    min,
                    length,
                });
            }
        }
        if let Some(max) = attribute.max_length {
            if length > max {
                return Err(ValidationError::TooLong {
                    attribute: attribute.label().to_string(),
                    max,
                    length,
                });
            }
        }

        // Definitions that never went through schema validation compile here
        let compiled;
        let filters = if attribute.compiled_filters.compiled_from(&attribute.filters) {
            &attribute.compiled_filters
        } else {
            compiled = FilterSet::compile(&attribute.filters).map_err(|e| {
                ValidationError::InvalidFilter {
                    attribute: attribute.label().to_string(),
                    pattern: e.pattern,
                    details: e.source.to_string(),
                }
            })?;
            &compiled
        };

        if let Some((index, pattern)) = filters.first_mismatch(&text) {
            return Err(ValidationError::FilterMismatch {
                attribute: attribute.label().to_string(),
                index,
                pattern: pattern.to_string(),
            });
        }

        *value = Value::String(text);
        Ok(())
    }

    fn check_definition(&self, attribute: &mut AttributeDefinition, path: &str) -> SchemaResult<()> {
        if let (Some(min), Some(max)) = (attribute.min_length, attribute.max_length) {
            if min > max {
                return Err(SchemaError::invalid_constraint(
                    path,
                    format!("minLength {} is greater than maxLength {}", min, max),
                ));
            }
        }

        attribute.compiled_filters =
            FilterSet::compile(&attribute.filters).map_err(|e| SchemaError::InvalidFilter {
                path: path.to_string(),
                pattern: e.pattern,
                details: e.source.to_string(),
            })?;

        Ok(())
    }
}
