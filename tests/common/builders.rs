//! Fluent builders for CI types and attribute definitions.

use cmdb_schema::{AttributeDefinition, CiType};

/// Builder for attribute definitions
#[derive(Debug, Clone)]
pub struct AttributeBuilder {
    attribute: AttributeDefinition,
}

impl AttributeBuilder {
    pub fn new(name: &str, format: &str) -> Self {
        Self {
            attribute: AttributeDefinition::new(name, format),
        }
    }

    pub fn group(name: &str) -> Self {
        Self::new(name, "group")
    }

    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self
    }

    pub fn array(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.attribute.is_array = true;
        self.attribute.min_count = min;
        self.attribute.max_count = max;
        self
    }

    pub fn lengths(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.attribute.min_length = min;
        self.attribute.max_length = max;
        self
    }

    pub fn filter(mut self, pattern: &str) -> Self {
        self.attribute.filters.push(pattern.to_string());
        self
    }

    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.attribute.min_value = min;
        self.attribute.max_value = max;
        self
    }

    pub fn child(mut self, child: AttributeBuilder) -> Self {
        self.attribute.children.push(child.build());
        self
    }

    pub fn build(self) -> AttributeDefinition {
        self.attribute
    }
}

/// Builder for CI types
#[derive(Debug, Clone)]
pub struct CiTypeBuilder {
    citype: CiType,
}

impl CiTypeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            citype: CiType::new(name),
        }
    }

    /// A server type exercising every built-in format
    pub fn server() -> Self {
        Self::new("Server")
            .attribute(AttributeBuilder::new("Hostname", "string").required().filter("[a-z0-9-]+"))
            .attribute(AttributeBuilder::new("Cores", "number").range(Some(1.0), Some(256.0)))
            .attribute(AttributeBuilder::new("Virtual", "boolean"))
            .attribute(AttributeBuilder::new("Commissioned", "timestamp"))
            .attribute(
                AttributeBuilder::group("Interfaces")
                    .array(Some(1), Some(4))
                    .child(AttributeBuilder::new("Name", "string").required())
                    .child(AttributeBuilder::new("Speed", "number"))
                    .child(AttributeBuilder::group("Address").child(AttributeBuilder::new(
                        "IPv4",
                        "string",
                    ))),
            )
    }

    pub fn short_name(mut self, short_name: &str) -> Self {
        self.citype.short_name = short_name.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.citype.description = description.to_string();
        self
    }

    pub fn attribute(mut self, attribute: AttributeBuilder) -> Self {
        self.citype.attributes.push(attribute.build());
        self
    }

    pub fn build(self) -> CiType {
        self.citype
    }
}
