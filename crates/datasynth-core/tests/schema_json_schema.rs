use std::fs;
use std::path::Path;

use datasynth_core::document_json_schema;
use jsonschema::JSONSchema;
use serde_json::json;

fn compiled() -> JSONSchema {
    let schema = serde_json::to_value(document_json_schema()).expect("serialize json schema");
    JSONSchema::compile(&schema).expect("compile json schema")
}

#[test]
fn json_schema_describes_documents() {
    let schema = serde_json::to_value(document_json_schema()).expect("serialize json schema");
    let properties = schema["properties"].as_object().expect("properties");
    assert!(properties.contains_key("project"));
    assert!(properties.contains_key("entities"));

    let definitions = schema["definitions"].as_object().expect("definitions");
    for name in ["Entity", "Attribute", "Constraints", "DataType", "DistributionKind"] {
        assert!(definitions.contains_key(name), "missing definition {name}");
    }
}

#[test]
fn demo_schema_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../schemas/person.schema.json");
    let stored = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("missing schema file at {}", path.display()));
    let document: serde_json::Value = serde_json::from_str(&stored).expect("parse schema file");
    assert!(compiled().is_valid(&document));
}

#[test]
fn unknown_types_are_structural_errors() {
    let document = json!({
        "entities": [
            { "name": "thing", "attributes": [ { "name": "x", "type": "quaternion" } ] }
        ]
    });
    assert!(!compiled().is_valid(&document));

    let document = json!({ "entities": [ { "name": "thing", "attributes": "nope" } ] });
    assert!(!compiled().is_valid(&document));
}
