//! CI type schemas: definitions, normalization and validation.
//!
//! # Key Types
//!
//! - [`CiType`] - a named schema with an ordered tree of attributes
//! - [`AttributeDefinition`] - one typed attribute, possibly a group of children
//! - [`FormatRegistry`] - lookup from format name to [`AttributeFormat`](crate::format::AttributeFormat)
//!
//! # Examples
//!
//! ```rust
//! use cmdb_schema::schema::{AttributeDefinition, CiType, FormatRegistry};
//! use cmdb_schema::ValidationConfig;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = FormatRegistry::new();
//! let mut server = CiType::new("Web Server")
//!     .with_attribute(AttributeDefinition::new("Hostname", "string"))
//!     .with_attribute(AttributeDefinition::new("Cores", "number"));
//! server.validate(&registry)?;
//! assert_eq!(server.short_name, "web_server");
//!
//! let mut record = json!({ "hostname": "web01", "cores": "8" });
//! server.validate_record(&registry, &ValidationConfig::default(), &mut record)?;
//! assert_eq!(record["cores"], json!(8));
//! # Ok(())
//! # }
//! ```

pub mod record;
pub mod registry;
pub mod short_name;
pub mod types;
pub mod validation;


pub use registry::FormatRegistry;
pub use short_name::{is_valid_short_name, short_name};
pub use types::{AttributeDefinition, CiType, GROUP_FORMAT, ModelMeta, find_attribute};
