//! Validation of CI records against their CI type.
//!
//! A record is a JSON object keyed by attribute name. Each attribute of the
//! type is looked up by short name, checked by its format and, for groups,
//! walked recursively through the group's children. Coerced values are only
//! written back to the caller's record once the whole record is valid.

use std::borrow::Cow;
use std::collections::HashSet;

use log::debug;
use serde_json::{Map, Value};

use super::registry::FormatRegistry;
use super::short_name::short_name;
use super::types::{AttributeDefinition, CiType};
use super::validation::join_path;
use crate::config::ValidationConfig;
use crate::error::{ValidationError, ValidationResult};
use crate::format::value_kind;

impl CiType {
    /// Validate a CI record against this (validated) CI type.
    ///
    /// On success `record` holds the canonical form of every value; on failure
    /// it is left exactly as it was.
    pub fn validate_record(
        &self,
        registry: &FormatRegistry,
        config: &ValidationConfig,
        record: &mut Value,
    ) -> ValidationResult<()> {
        let mut candidate = record.clone();
        let fields = candidate.as_object_mut().ok_or_else(|| {
            ValidationError::invalid_type(&self.short_name, "object", value_kind(record))
        })?;

        if let Err(error) = validate_fields(&self.attributes, fields, "", registry, config) {
            debug!("Record rejected by CI type '{}': {}", self.short_name, error);
            return Err(error);
        }

        *record = candidate;
        Ok(())
    }
}

fn field_key(attribute: &AttributeDefinition) -> Cow<'_, str> {
    if attribute.short_name.is_empty() {
        Cow::Owned(short_name(&attribute.name))
    } else {
        Cow::Borrowed(&attribute.short_name)
    }
}

fn validate_fields(
    attributes: &[AttributeDefinition],
    fields: &mut Map<String, Value>,
    parent: &str,
    registry: &FormatRegistry,
    config: &ValidationConfig,
) -> ValidationResult<()> {
    let mut matched = HashSet::new();

    for attribute in attributes {
        let expected = field_key(attribute);
        let path = join_path(parent, &expected);

        let key = fields
            .keys()
            .find(|key| short_name(key) == expected)
            .cloned();

        let Some(key) = key else {
            if attribute.required {
                return Err(ValidationError::missing_required(path));
            }
            continue;
        };

        let Some(value) = fields.get_mut(&key) else {
            continue;
        };
        matched.insert(key);

        if value.is_null() {
            if attribute.required {
                return Err(ValidationError::missing_required(path));
            }
            continue;
        }

        validate_attribute(attribute, value, &path, registry, config)?;
    }

    if config.strict_fields {
        if let Some(unknown) = fields.keys().find(|key| !matched.contains(*key)) {
            return Err(ValidationError::UnknownAttribute {
                attribute: join_path(parent, unknown),
            });
        }
    }

    Ok(())
}

fn validate_attribute(
    attribute: &AttributeDefinition,
    value: &mut Value,
    path: &str,
    registry: &FormatRegistry,
    config: &ValidationConfig,
) -> ValidationResult<()> {
    if !attribute.is_array {
        if value.is_array() {
            return Err(ValidationError::ExpectedSingleValue {
                attribute: path.to_string(),
            });
        }
        return validate_value(attribute, value, path, registry, config);
    }

    let Value::Array(items) = value else {
        return Err(ValidationError::ExpectedArray {
            attribute: path.to_string(),
        });
    };

    let count = items.len();
    if let Some(min) = attribute.min_count {
        if count < min {
            return Err(ValidationError::TooFewValues {
                attribute: path.to_string(),
                min,
                count,
            });
        }
    }
    if let Some(max) = attribute.max_count {
        if count > max {
            return Err(ValidationError::TooManyValues {
                attribute: path.to_string(),
                max,
                count,
            });
        }
    }

    for (index, item) in items.iter_mut().enumerate() {
        let item_path = format!("{}[{}]", path, index);
        validate_value(attribute, item, &item_path, registry, config)?;
    }

    Ok(())
}

fn validate_value(
    attribute: &AttributeDefinition,
    value: &mut Value,
    path: &str,
    registry: &FormatRegistry,
    config: &ValidationConfig,
) -> ValidationResult<()> {
    let format = registry
        .get(&attribute.format)
        .ok_or_else(|| ValidationError::UnsupportedFormat {
            attribute: path.to_string(),
            format: attribute.format.clone(),
        })?;

    format
        .validate(attribute, value)
        .map_err(|error| error.in_field(path))?;

    if attribute.is_group() {
        if let Value::Object(fields) = value {
            validate_fields(&attribute.children, fields, path, registry, config)?;
        }
    }

    Ok(())
}
