//! Property tests for short name derivation.

use cmdb_schema::schema::{is_valid_short_name, short_name};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_alphanumeric_names_are_idempotent(name in "[a-zA-Z0-9]{1,32}") {
        let once = short_name(&name);
        prop_assert_eq!(short_name(&once), once.clone());
        prop_assert!(is_valid_short_name(&once));
    }

    #[test]
    fn test_derivation_is_idempotent_for_any_input(name in "\\PC{0,40}") {
        let once = short_name(&name);
        prop_assert_eq!(short_name(&once), once);
    }

    #[test]
    fn test_derived_names_use_the_alphabet(name in "\\PC{0,40}") {
        let derived = short_name(&name);
        prop_assert!(derived.is_empty() || is_valid_short_name(&derived));
    }

    #[test]
    fn test_case_does_not_matter(name in "[a-zA-Z0-9 _-]{0,32}") {
        prop_assert_eq!(short_name(&name.to_uppercase()), short_name(&name.to_lowercase()));
    }
}
