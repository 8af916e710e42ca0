//! Schema-time validation of CI types.
//!
//! Validation normalizes a CI type into a new tree: short names are derived,
//! every attribute is checked against the format registry and group children
//! are validated recursively. The first problem found is returned; on success
//! the normalized tree replaces the original in one step.

use std::collections::HashSet;

use log::{debug, trace};

use super::registry::FormatRegistry;
use super::short_name::{is_valid_short_name, short_name};
use super::types::{AttributeDefinition, CiType};
use crate::config::ValidationConfig;
use crate::error::{SchemaError, SchemaResult};
use crate::format::FilterSet;

impl CiType {
    /// Validate this CI type with default settings, normalizing it in place.
    ///
    /// The CI type is left untouched when validation fails.
    pub fn validate(&mut self, registry: &FormatRegistry) -> SchemaResult<()> {
        self.validate_with(registry, &ValidationConfig::default())
    }

    /// Validate this CI type with explicit settings, normalizing it in place.
    pub fn validate_with(
        &mut self,
        registry: &FormatRegistry,
        config: &ValidationConfig,
    ) -> SchemaResult<()> {
        *self = self.normalized(registry, config)?;
        Ok(())
    }

    /// Validate this CI type and return its normalized form.
    ///
    /// A supplied short name is kept for the type itself; attribute short
    /// names are always re-derived from their names.
    pub fn normalized(
        &self,
        registry: &FormatRegistry,
        config: &ValidationConfig,
    ) -> SchemaResult<CiType> {
        debug!("Validating CI type '{}'", self.name);

        if self.name.is_empty() {
            return Err(SchemaError::MissingTypeName);
        }

        let type_short_name = if self.short_name.is_empty() {
            short_name(&self.name)
        } else {
            self.short_name.clone()
        };

        if !is_valid_short_name(&type_short_name) {
            return Err(SchemaError::InvalidTypeName);
        }

        let attributes = normalize_attributes(&self.attributes, "", 1, registry, config)?;

        debug!(
            "CI type '{}' is valid ({} root attributes)",
            type_short_name,
            attributes.len()
        );

        Ok(CiType {
            meta: self.meta.clone(),
            name: self.name.clone(),
            short_name: type_short_name,
            description: self.description.clone(),
            attributes,
        })
    }
}

/// Join a parent path and a short name with `.`.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

/// Validate one level of sibling attributes, returning their normalized copies.
///
/// `parent` is the dotted path of the enclosing group and `depth` the nesting
/// level of the siblings, starting at 1 for root attributes.
fn normalize_attributes(
    definitions: &[AttributeDefinition],
    parent: &str,
    depth: usize,
    registry: &FormatRegistry,
    config: &ValidationConfig,
) -> SchemaResult<Vec<AttributeDefinition>> {
    let mut normalized = Vec::with_capacity(definitions.len());
    let mut seen = HashSet::new();

    for definition in definitions {
        if definition.name.is_empty() {
            return Err(SchemaError::MissingAttributeName {
                parent: parent.to_string(),
            });
        }

        let attribute_short_name = short_name(&definition.name);
        let path = join_path(parent, &attribute_short_name);
        if !is_valid_short_name(&attribute_short_name) {
            return Err(SchemaError::InvalidAttributeName { path });
        }

        if !seen.insert(attribute_short_name.clone()) {
            return Err(SchemaError::DuplicateAttribute { path });
        }

        if definition.format.is_empty() {
            return Err(SchemaError::MissingAttributeType { path });
        }

        let format = registry
            .get(&definition.format)
            .ok_or_else(|| SchemaError::unsupported_format(&definition.format, &path))?;

        check_cardinality(definition, &path)?;

        let mut attribute = AttributeDefinition {
            short_name: attribute_short_name,
            ..shallow_copy(definition)
        };
        format.check_definition(&mut attribute, &path)?;

        if definition.is_group() {
            if depth >= config.max_depth && !definition.children.is_empty() {
                return Err(SchemaError::NestingTooDeep {
                    path,
                    max_depth: config.max_depth,
                });
            }
            attribute.children =
                normalize_attributes(&definition.children, &path, depth + 1, registry, config)?;
        } else if !definition.children.is_empty() {
            return Err(SchemaError::ChildrenOnNonGroup { path });
        }

        trace!("Normalized attribute '{}' ({})", path, definition.format);
        normalized.push(attribute);
    }

    Ok(normalized)
}

fn check_cardinality(definition: &AttributeDefinition, path: &str) -> SchemaResult<()> {
    if let (Some(min), Some(max)) = (definition.min_count, definition.max_count) {
        if min > max {
            return Err(SchemaError::invalid_constraint(
                path,
                format!("minCount {} is greater than maxCount {}", min, max),
            ));
        }
    }
    Ok(())
}

/// Copy every field of `definition` except its children and derived state.
fn shallow_copy(definition: &AttributeDefinition) -> AttributeDefinition {
    AttributeDefinition {
        name: definition.name.clone(),
        short_name: definition.short_name.clone(),
        format: definition.format.clone(),
        description: definition.description.clone(),
        children: Vec::new(),
        required: definition.required,
        is_array: definition.is_array,
        min_count: definition.min_count,
        max_count: definition.max_count,
        singular: definition.singular.clone(),
        min_length: definition.min_length,
        max_length: definition.max_length,
        filters: definition.filters.clone(),
        compiled_filters: FilterSet::default(),
        units: definition.units.clone(),
        min_value: definition.min_value,
        max_value: definition.max_value,
    }
}
