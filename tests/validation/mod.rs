//! Validation tests module.

pub mod records;
pub mod schema_structure;
pub mod short_names;

// Re-export commonly used test utilities
pub use crate::common::builders::{AttributeBuilder, CiTypeBuilder};
