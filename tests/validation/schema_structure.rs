//! CI type structure validation tests.
//!
//! These tests load CI types the way the REST layer receives them (JSON) and
//! check the error texts that are reported back to clients.

use serde_json::json;

use cmdb_schema::{CiType, SchemaError};

use super::{AttributeBuilder, CiTypeBuilder};
use crate::common::defaults;
use crate::{assert_error_message_contains, assert_validation_success};

fn from_json(value: serde_json::Value) -> CiType {
    serde_json::from_value(value).expect("CI type JSON should deserialize")
}

#[test]
fn test_server_type_validates() {
    let (registry, config) = defaults();
    let mut citype = CiTypeBuilder::server().description("Physical or virtual host").build();

    assert_validation_success!(citype.validate_with(&registry, &config));
    assert_eq!(citype.short_name, "server");
    assert_eq!(
        citype.attribute_at("interfaces.address.ipv4").map(|a| a.format.as_str()),
        Some("string")
    );
}

#[test]
fn test_type_from_json_with_nested_groups() {
    let (registry, _) = defaults();
    let mut citype = from_json(json!({
        "name": "Application Server",
        "description": "Hosts one or more applications",
        "attributes": [
            { "name": "Environment", "type": "string", "filters": ["prod|test|dev"] },
            {
                "name": "Runtime",
                "type": "group",
                "children": [
                    { "name": "Vendor", "type": "string" },
                    { "name": "Heap Size", "type": "number", "units": "MB", "minValue": 0 }
                ]
            }
        ]
    }));

    assert_validation_success!(citype.validate(&registry));
    assert_eq!(citype.short_name, "application_server");

    let heap = citype.attribute_at("runtime.heap_size").expect("heap size attribute");
    assert_eq!(heap.units, "MB");
    assert_eq!(heap.min_value, Some(0.0));
}

#[test]
fn test_error_texts_for_bad_definitions() {
    let (registry, _) = defaults();

    let cases = vec![
        (json!({ "attributes": [] }), "no CI Type name specified"),
        (json!({ "name": "***" }), "invalid characters in CI Type name"),
        (
            json!({ "name": "Server", "attributes": [{ "type": "string" }] }),
            "no attribute name specified",
        ),
        (
            json!({ "name": "Server", "attributes": [{ "name": "Owner" }] }),
            "no type specified for attribute 'owner'",
        ),
        (
            json!({ "name": "Server", "attributes": [{ "name": "Owner", "type": "person" }] }),
            "unsupported attribute format 'person' for attribute 'owner'",
        ),
        (
            json!({
                "name": "Server",
                "attributes": [{
                    "name": "Owner",
                    "type": "string",
                    "children": [{ "name": "Email", "type": "string" }]
                }]
            }),
            "attribute 'owner' has children but is not a group attribute",
        ),
        (
            json!({
                "name": "Server",
                "attributes": [{
                    "name": "Owner",
                    "type": "group",
                    "children": [{ "type": "string" }]
                }]
            }),
            "no attribute name specified",
        ),
    ];

    for (definition, expected) in cases {
        let mut citype = from_json(definition);
        assert_error_message_contains!(citype.validate(&registry), expected);
    }
}

#[test]
fn test_nameless_child_reports_its_group() {
    let (registry, _) = defaults();
    let mut citype = from_json(json!({
        "name": "Server",
        "attributes": [{
            "name": "Owner",
            "type": "group",
            "children": [{ "type": "string" }]
        }]
    }));

    let error = citype.validate(&registry).unwrap_err();
    assert_eq!(error.to_string(), "no attribute name specified");
    assert_eq!(
        error,
        SchemaError::MissingAttributeName {
            parent: "owner".to_string()
        }
    );
}

#[test]
fn test_first_error_wins() {
    let (registry, _) = defaults();
    let mut citype = CiTypeBuilder::new("Server")
        .attribute(AttributeBuilder::new("Owner", "person"))
        .attribute(AttributeBuilder::new("", "string"))
        .build();

    assert_eq!(
        citype.validate(&registry),
        Err(SchemaError::unsupported_format("person", "owner"))
    );
}

#[test]
fn test_deep_group_error_path() {
    let (registry, _) = defaults();
    let mut citype = CiTypeBuilder::new("Server")
        .attribute(
            AttributeBuilder::group("Chassis").child(
                AttributeBuilder::group("Power Supply")
                    .child(AttributeBuilder::new("Watts", "number").range(Some(500.0), Some(100.0))),
            ),
        )
        .build();

    assert_error_message_contains!(
        citype.validate(&registry),
        "invalid constraints for attribute 'chassis.power_supply.watts'"
    );
}

#[test]
fn test_validated_type_serializes_short_names() {
    let (registry, _) = defaults();
    let mut citype = CiTypeBuilder::server().build();
    citype.validate(&registry).unwrap();

    let value = serde_json::to_value(&citype).unwrap();
    assert_eq!(value["shortName"], json!("server"));
    assert_eq!(value["attributes"][4]["shortName"], json!("interfaces"));
    assert_eq!(
        value["attributes"][4]["children"][2]["children"][0]["shortName"],
        json!("ipv4")
    );

    // Re-validating a normalized type is a no-op
    let mut again: CiType = serde_json::from_value(value).unwrap();
    again.validate(&registry).unwrap();
    assert_eq!(again, citype);
}

#[test]
fn test_independent_copies_validate_concurrently() {
    let (registry, config) = defaults();
    let citype = CiTypeBuilder::server().build();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let copy = citype.clone();
                let registry = &registry;
                let config = &config;
                scope.spawn(move || copy.normalized(registry, config))
            })
            .collect();

        for handle in handles {
            let normalized = handle.join().expect("validation thread panicked");
            assert_eq!(normalized.map(|c| c.short_name), Ok("server".to_string()));
        }
    });
}
