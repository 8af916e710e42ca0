//! Core type definitions for CI type schemas.
//!
//! A [`CiType`] owns an ordered forest of [`AttributeDefinition`]s. Group
//! attributes own their children outright; there are no back-references, so a
//! tree can be cloned, normalized and swapped in as a whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::short_name::short_name;
use crate::format::FilterSet;

/// Format name of group attributes, the only format allowed to have children.
pub const GROUP_FORMAT: &str = "group";

/// Identity and bookkeeping fields shared by persisted models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

/// A CI type: the named schema every CI of that type must satisfy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiType {
    #[serde(flatten)]
    pub meta: ModelMeta,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Lookup key derived from `name` when not supplied
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Root attributes, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeDefinition>,
}

/// Definition of a single CI type attribute.
///
/// Constraint fields only mean something for the formats that read them;
/// bounds are optional so that `0` is a real bound rather than "unset".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    /// Format registry key (`string`, `number`, `group`, ...)
    #[serde(rename = "type", default)]
    pub format: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Nested attributes, only allowed on group attributes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AttributeDefinition>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,

    /// Display name for one element of an array group
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub singular: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expressions that must all match the whole value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
    /// `filters` compiled during schema validation
    #[serde(skip)]
    pub compiled_filters: FilterSet,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub units: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl AttributeDefinition {
    /// Create an attribute with the given name and format.
    pub fn new(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
            ..Self::default()
        }
    }

    /// Create a group attribute owning `children`.
    pub fn group(name: impl Into<String>, children: Vec<AttributeDefinition>) -> Self {
        Self {
            children,
            ..Self::new(name, GROUP_FORMAT)
        }
    }

    pub fn is_group(&self) -> bool {
        self.format == GROUP_FORMAT
    }

    /// Name used in error messages: the short name once derived, else the raw name.
    pub fn label(&self) -> &str {
        if self.short_name.is_empty() {
            &self.name
        } else {
            &self.short_name
        }
    }

    /// Find a direct child by short name.
    pub fn child(&self, name: &str) -> Option<&AttributeDefinition> {
        find_attribute(&self.children, name)
    }
}

impl CiType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeDefinition) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Find a root attribute by short name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        find_attribute(&self.attributes, name)
    }

    /// Resolve a dotted short-name path such as `hardware.cpu.cores`.
    pub fn attribute_at(&self, path: &str) -> Option<&AttributeDefinition> {
        let mut segments = path.split('.');
        let mut current = self.attribute(segments.next()?)?;
        for segment in segments {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// Assign identity fields for a newly created CI type.
    pub fn init_model(&mut self) {
        let now = Utc::now();
        self.meta.id.get_or_insert_with(Uuid::new_v4);
        self.meta.created.get_or_insert(now);
        self.meta.modified = Some(now);
    }

    /// Prepare `self` as the full replacement of `original`.
    ///
    /// Identity fields are carried over and the short name is re-derived from
    /// the new name. Returns `true` when the short name, and therefore the
    /// type's location, changed.
    pub fn replace(&mut self, original: &CiType) -> bool {
        self.meta.id = original.meta.id;
        self.meta.created = original.meta.created;
        self.short_name = short_name(&self.name);
        self.init_model();
        self.short_name != original.short_name
    }
}

/// Look up an attribute among siblings by short name, ignoring case of the query.
pub fn find_attribute<'a>(
    attributes: &'a [AttributeDefinition],
    name: &str,
) -> Option<&'a AttributeDefinition> {
    let name = name.to_lowercase();
    attributes.iter().find(|attr| attr.short_name == name)
}
