use datasynth_core::{Attribute, Constraints, DataType, Entity, SchemaDocument};

#[test]
fn serializes_schema_deterministically() {
    let document = SchemaDocument {
        project: Some("demo".to_string()),
        entities: vec![
            Entity::new("person").with_attribute(
                Attribute::new("age", DataType::Integer)
                    .with_constraints(Constraints::range(18.0, 80.0)),
            ),
        ],
    };

    let json = serde_json::to_string_pretty(&document).expect("serialize schema");
    let expected = r#"{
  "project": "demo",
  "entities": [
    {
      "name": "person",
      "attributes": [
        {
          "name": "age",
          "type": "integer",
          "constraints": {
            "min": 18.0,
            "max": 80.0,
            "nullable": false,
            "distribution": "uniform"
          }
        }
      ],
      "children": []
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn parses_toml_schema() {
    let source = r#"
project = "shop"

[[entities]]
name = "order"

[[entities.attributes]]
name = "status"
type = "enum"
constraints = { possible_values = ["new", "paid", "shipped"] }

[[entities.attributes]]
name = "total"
type = "double"

[[entities.children]]
name = "customer"
attributes = [{ name = "email", type = "email" }]
"#;

    let document: SchemaDocument = toml::from_str(source).expect("parse toml schema");
    let order = document.entity("order").expect("order entity");
    assert_eq!(order.attributes.len(), 2);
    assert_eq!(
        order.attributes[0]
            .constraints
            .as_ref()
            .and_then(|c| c.candidates())
            .map(<[String]>::len),
        Some(3)
    );
    assert_eq!(order.attributes[1].data_type, Some(DataType::Double));
    assert_eq!(order.children[0].name.as_deref(), Some("customer"));
    assert_eq!(order.children[0].attributes[0].data_type, Some(DataType::Email));
}
