#![allow(non_snake_case)]

use super::*;

#[test]
fn SchemaNode___any_sentinel___serializes_as_true_literal() {
    assert_eq!(SchemaNode::Any.to_json_string().unwrap(), "true");
}

#[test]
fn SchemaNode___never_sentinel___serializes_as_false_literal() {
    assert_eq!(SchemaNode::Never.to_json_string().unwrap(), "false");
}

#[test]
fn SchemaNode___sentinels___deserialize_back_to_sentinels() {
    assert_eq!(SchemaNode::from_json_str("true").unwrap(), SchemaNode::Any);
    assert_eq!(SchemaNode::from_json_str("false").unwrap(), SchemaNode::Never);
}

#[test]
fn SchemaNode___empty_doc___serializes_as_empty_object() {
    let node = SchemaNode::Doc(SchemaDoc::default());

    assert_eq!(node.to_json_string().unwrap(), "{}");
}

#[test]
fn SchemaDoc___default_fields___are_omitted() {
    let node = SchemaNode::Doc(SchemaDoc {
        schema_type: Some(SchemaType::String),
        ..Default::default()
    });

    assert_eq!(node.to_json_string().unwrap(), r#"{"type":"string"}"#);
}

#[test]
fn SchemaDoc___fixed_array___writes_camel_case_bounds() {
    let node = SchemaNode::Doc(SchemaDoc {
        schema_type: Some(SchemaType::Array),
        items: Some(Box::new(SchemaNode::Doc(SchemaDoc {
            schema_type: Some(SchemaType::Integer),
            format: Some("int64".into()),
            ..Default::default()
        }))),
        min_items: Some(4),
        max_items: Some(4),
        ..Default::default()
    });

    let json = node.to_json_string().unwrap();

    assert_eq!(
        json,
        r#"{"type":"array","items":{"type":"integer","format":"int64"},"minItems":4,"maxItems":4}"#
    );
}

#[test]
fn SchemaDoc___closed_object___round_trips() {
    let mut properties = IndexMap::new();
    properties.insert(
        "name".to_string(),
        SchemaNode::Doc(SchemaDoc {
            schema_type: Some(SchemaType::String),
            ..Default::default()
        }),
    );
    let node = SchemaNode::Doc(SchemaDoc {
        title: Some("User".into()),
        schema_type: Some(SchemaType::Object),
        properties,
        required: vec!["name".to_string()],
        additional_properties: Some(Box::new(SchemaNode::Never)),
        ..Default::default()
    });

    let json = node.to_json_string().unwrap();
    let back = SchemaNode::from_json_str(&json).unwrap();

    assert!(json.contains(r#""additionalProperties":false"#));
    assert_eq!(back, node);
}

#[test]
fn SchemaDoc___enum_values___serialize_under_enum_key() {
    let node = SchemaNode::Doc(SchemaDoc {
        schema_type: Some(SchemaType::String),
        enum_values: vec!["A".into(), "B".into()],
        ..Default::default()
    });

    assert_eq!(
        node.to_json_string().unwrap(),
        r#"{"type":"string","enum":["A","B"]}"#
    );
}

#[test]
fn SchemaDoc___properties___preserve_declaration_order() {
    let json = r#"{"type":"object","properties":{"z":{"type":"string"},"a":{"type":"integer"}}}"#;

    let node = SchemaNode::from_json_str(json).unwrap();

    let doc = node.as_doc().unwrap();
    let keys: Vec<&str> = doc.properties.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a"]);
}

#[test]
fn SchemaNode___nested_sentinel___survives_round_trip() {
    let json = r#"{"type":"object","additionalProperties":true}"#;

    let node = SchemaNode::from_json_str(json).unwrap();

    let doc = node.as_doc().unwrap();
    assert_eq!(doc.additional_properties.as_deref(), Some(&SchemaNode::Any));
}
