//! Error types for CI type schema and record validation.
//!
//! Schema problems (a malformed CI type definition) and value problems (a CI
//! record that does not satisfy its type) are kept in separate enums so callers
//! can tell "fix your type" apart from "fix your data". Both render messages
//! that are meant to be shown to API clients verbatim.

/// Main error type for operations that mix schema, record and file handling.
#[derive(Debug, thiserror::Error)]
pub enum CmdbError {
    /// The CI type definition itself is invalid
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A CI record does not conform to its CI type
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem errors while reading definitions or records
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural problems in a CI type definition.
///
/// Validation stops at the first offending node; attribute variants carry the
/// dotted short-name path of that node.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("no CI Type name specified")]
    MissingTypeName,

    #[error("invalid characters in CI Type name")]
    InvalidTypeName,

    /// `parent` is the dotted path of the enclosing group, empty at the root.
    /// It is left out of the message, which callers relay verbatim.
    #[error("no attribute name specified")]
    MissingAttributeName { parent: String },

    #[error("invalid characters in attribute '{path}'")]
    InvalidAttributeName { path: String },

    #[error("no type specified for attribute '{path}'")]
    MissingAttributeType { path: String },

    #[error("unsupported attribute format '{format}' for attribute '{path}'")]
    UnsupportedFormat { format: String, path: String },

    #[error("attribute '{path}' has children but is not a group attribute")]
    ChildrenOnNonGroup { path: String },

    #[error("duplicate attribute '{path}'")]
    DuplicateAttribute { path: String },

    #[error("invalid filter '{pattern}' for attribute '{path}': {details}")]
    InvalidFilter {
        path: String,
        pattern: String,
        details: String,
    },

    #[error("invalid constraints for attribute '{path}': {details}")]
    InvalidConstraint { path: String, details: String },

    #[error("attribute '{path}' exceeds the maximum group depth of {max_depth}")]
    NestingTooDeep { path: String, max_depth: usize },
}

/// Errors raised when a value fails the constraints of its attribute format.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The definition handed to a format declares a different type
    #[error("attribute '{attribute}' is declared as '{declared}' but was checked as '{expected}'")]
    FormatMismatch {
        attribute: String,
        expected: String,
        declared: String,
    },

    #[error("required attribute '{attribute}' is missing")]
    MissingRequired { attribute: String },

    #[error("attribute '{attribute}' has invalid type, expected {expected}, got {actual}")]
    InvalidType {
        attribute: String,
        expected: String,
        actual: String,
    },

    #[error("attribute '{attribute}' must be at least {min} characters long, got {length}")]
    TooShort {
        attribute: String,
        min: usize,
        length: usize,
    },

    #[error("attribute '{attribute}' must be at most {max} characters long, got {length}")]
    TooLong {
        attribute: String,
        max: usize,
        length: usize,
    },

    #[error("attribute '{attribute}' does not match filter {index} ('{pattern}')")]
    FilterMismatch {
        attribute: String,
        index: usize,
        pattern: String,
    },

    #[error("attribute '{attribute}' has an invalid filter '{pattern}': {details}")]
    InvalidFilter {
        attribute: String,
        pattern: String,
        details: String,
    },

    #[error("attribute '{attribute}' has invalid number: {value}")]
    InvalidNumber { attribute: String, value: String },

    #[error("attribute '{attribute}' value {value} is less than the minimum of {min}")]
    BelowMinimum {
        attribute: String,
        value: f64,
        min: f64,
    },

    #[error("attribute '{attribute}' value {value} is greater than the maximum of {max}")]
    AboveMaximum {
        attribute: String,
        value: f64,
        max: f64,
    },

    #[error("attribute '{attribute}' has invalid boolean value: {value}")]
    InvalidBoolean { attribute: String, value: String },

    #[error("attribute '{attribute}' has invalid timestamp: {value}")]
    InvalidTimestamp { attribute: String, value: String },

    #[error("attribute '{attribute}' must be an array")]
    ExpectedArray { attribute: String },

    #[error("attribute '{attribute}' must be single-valued (not array)")]
    ExpectedSingleValue { attribute: String },

    #[error("attribute '{attribute}' requires at least {min} values, got {count}")]
    TooFewValues {
        attribute: String,
        min: usize,
        count: usize,
    },

    #[error("attribute '{attribute}' allows at most {max} values, got {count}")]
    TooManyValues {
        attribute: String,
        max: usize,
        count: usize,
    },

    #[error("unknown attribute '{attribute}'")]
    UnknownAttribute { attribute: String },

    #[error("unsupported attribute format '{format}' for attribute '{attribute}'")]
    UnsupportedFormat { attribute: String, format: String },

    /// A format error raised for a nested record field
    #[error("invalid value for '{path}': {source}")]
    InField {
        path: String,
        #[source]
        source: Box<ValidationError>,
    },
}

/// Errors raised while loading or checking a [`ValidationConfig`](crate::config::ValidationConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// None of the default locations contain a configuration file
    #[error("no configuration file was found (searched: {searched})")]
    NotFound { searched: String },

    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl SchemaError {
    /// Create an unsupported format error
    pub fn unsupported_format(format: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
            path: path.into(),
        }
    }

    /// Create an invalid constraint error
    pub fn invalid_constraint(path: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            path: path.into(),
            details: details.into(),
        }
    }
}

impl ValidationError {
    /// Create a missing required attribute error
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::MissingRequired {
            attribute: attribute.into(),
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidType {
            attribute: attribute.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Attach a dotted record path to this error.
    pub fn in_field(self, path: impl Into<String>) -> Self {
        Self::InField {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any [`ValidationError::InField`] wrappers.
    pub fn root_cause(&self) -> &ValidationError {
        match self {
            Self::InField { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

// Result type aliases for convenience
pub type CmdbResult<T> = Result<T, CmdbError>;
pub type SchemaResult<T> = Result<T, SchemaError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
