//! Common test utilities for CI type and record validation.

use cmdb_schema::{FormatRegistry, ValidationConfig};

pub mod builders;

/// Install a test logger once; repeated calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Registry with the built-in formats and default settings.
pub fn defaults() -> (FormatRegistry, ValidationConfig) {
    init_logging();
    (FormatRegistry::new(), ValidationConfig::default())
}

/// Custom assertion macro for specific error messages
#[macro_export]
macro_rules! assert_error_message_contains {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(err) => assert!(
                err.to_string().contains($substring),
                "Error message '{}' does not contain '{}'",
                err.to_string(),
                $substring
            ),
            Ok(_) => panic!(
                "Expected error containing '{}', but validation passed",
                $substring
            ),
        }
    };
}

/// Custom assertion macro for successful validation
#[macro_export]
macro_rules! assert_validation_success {
    ($result:expr) => {
        match $result {
            Ok(_) => {
                // Success as expected
            }
            Err(err) => panic!("Expected validation to succeed, but got error: {}", err),
        }
    };
}

/// Assert that a record failed with the given root cause variant
#[macro_export]
macro_rules! assert_root_cause {
    ($result:expr, $error_variant:pat) => {
        match $result {
            Err(err) => match err.root_cause() {
                $error_variant => {
                    // Specific error type matched
                }
                other => panic!("Expected specific validation error, got {:?}", other),
            },
            Ok(_) => panic!("Expected validation error, but validation passed"),
        }
    };
}
