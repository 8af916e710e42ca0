//! CI record validation tests.
//!
//! Records are validated against a published (already validated) CI type;
//! each value goes through its attribute's format and group values recurse
//! into the group's children.

use serde_json::{Value, json};

use cmdb_schema::{CiType, ValidationConfig, ValidationError};

use super::CiTypeBuilder;
use crate::common::defaults;
use crate::{assert_error_message_contains, assert_root_cause, assert_validation_success};

fn published_server() -> CiType {
    let (registry, config) = defaults();
    let mut citype = CiTypeBuilder::server().build();
    citype.validate_with(&registry, &config).unwrap();
    citype
}

fn check(record: &mut Value) -> Result<(), ValidationError> {
    let (registry, config) = defaults();
    published_server().validate_record(&registry, &config, record)
}

fn valid_record() -> Value {
    json!({
        "hostname": "web-01",
        "cores": "16",
        "virtual": "TRUE",
        "commissioned": "Thu, 04 Feb 1943 01:02:03 GMT",
        "interfaces": [
            { "name": "eth0", "speed": 1000, "address": { "ipv4": "10.0.0.5" } }
        ]
    })
}

#[test]
fn test_valid_record_is_canonicalized() {
    let mut record = valid_record();
    assert_validation_success!(check(&mut record));

    assert_eq!(record["cores"], json!(16));
    assert_eq!(record["virtual"], json!(true));
    assert_eq!(record["commissioned"], json!(-849135477000i64));
    assert_eq!(record["interfaces"][0]["address"]["ipv4"], json!("10.0.0.5"));
}

#[test]
fn test_canonical_record_validates_again_unchanged() {
    let mut record = valid_record();
    check(&mut record).unwrap();
    let canonical = record.clone();

    check(&mut record).unwrap();
    assert_eq!(record, canonical);
}

#[test]
fn test_filter_failure_reports_pattern() {
    let mut record = valid_record();
    record["hostname"] = json!("Web_01");

    assert_error_message_contains!(check(&mut record), "[a-z0-9-]+");
}

#[test]
fn test_number_bounds() {
    let mut record = valid_record();
    record["cores"] = json!(0);
    assert_root_cause!(check(&mut record), ValidationError::BelowMinimum { .. });

    let mut record = valid_record();
    record["cores"] = json!("1e3");
    assert_root_cause!(check(&mut record), ValidationError::AboveMaximum { .. });
}

#[test]
fn test_optional_empty_values_skip_checks() {
    let mut record = valid_record();
    record["cores"] = json!("");
    record["commissioned"] = Value::Null;

    assert_validation_success!(check(&mut record));
    assert_eq!(record["cores"], json!(""));
}

#[test]
fn test_required_group_child() {
    let mut record = valid_record();
    record["interfaces"] = json!([{ "speed": 100 }]);

    assert_eq!(
        check(&mut record),
        Err(ValidationError::missing_required("interfaces[0].name"))
    );
}

#[test]
fn test_array_minimum_count() {
    let mut record = valid_record();
    record["interfaces"] = json!([]);

    assert_root_cause!(
        check(&mut record),
        ValidationError::TooFewValues { min: 1, count: 0, .. }
    );
}

#[test]
fn test_nested_group_must_be_mapping() {
    let mut record = valid_record();
    record["interfaces"][0]["address"] = json!("10.0.0.5");

    let result = check(&mut record);
    assert_error_message_contains!(result.clone(), "interfaces[0].address");
    assert_root_cause!(result, ValidationError::InvalidType { .. });
}

#[test]
fn test_field_names_match_by_short_name() {
    let mut record = json!({
        "HOSTNAME": "db-01",
        "Interfaces": [{ "Name": "bond0" }]
    });

    assert_validation_success!(check(&mut record));
}

#[test]
fn test_unknown_fields_depend_on_config() {
    let (registry, _) = defaults();
    let citype = published_server();
    let mut record = valid_record();
    record["rack"] = json!("A1");

    let strict = ValidationConfig::default();
    assert_eq!(
        citype.validate_record(&registry, &strict, &mut record),
        Err(ValidationError::UnknownAttribute {
            attribute: "rack".to_string()
        })
    );

    let lenient = ValidationConfig {
        strict_fields: false,
        ..ValidationConfig::default()
    };
    assert_validation_success!(citype.validate_record(&registry, &lenient, &mut record));
    assert_eq!(record["rack"], json!("A1"));
}
