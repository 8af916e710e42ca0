//! CI type schemas and attribute validation for a configuration management
//! database.
//!
//! Operators describe configuration item (CI) types as trees of named, typed
//! attributes. This crate validates those definitions and checks CI records
//! against them, coercing values into canonical form along the way.
//!
//! # Core Components
//!
//! - [`CiType`] - CI type definition with schema-time validation
//! - [`FormatRegistry`] - pluggable attribute formats keyed by name
//! - [`format::AttributeFormat`] - trait implemented by each value format
//! - [`ValidationConfig`] - settings for schema and record validation
//!
//! # Quick Start
//!
//! ```rust
//! use cmdb_schema::{AttributeDefinition, CiType, FormatRegistry, ValidationConfig};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = FormatRegistry::new();
//! let mut citype: CiType = serde_json::from_value(json!({
//!     "name": "Server",
//!     "attributes": [
//!         { "name": "Hostname", "type": "string", "required": true },
//!         { "name": "Commissioned", "type": "timestamp" }
//!     ]
//! }))?;
//! citype.validate(&registry)?;
//!
//! let mut record = json!({ "hostname": "db01", "commissioned": "1970-01-01T00:00:01Z" });
//! citype.validate_record(&registry, &ValidationConfig::default(), &mut record)?;
//! assert_eq!(record["commissioned"], json!(1000));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod schema;

// Re-export commonly used types for convenience
pub use config::ValidationConfig;
pub use error::{
    CmdbError, CmdbResult, ConfigurationError, SchemaError, SchemaResult, ValidationError,
    ValidationResult,
};
pub use format::AttributeFormat;
pub use schema::{AttributeDefinition, CiType, FormatRegistry};
