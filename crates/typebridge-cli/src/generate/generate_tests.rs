#![allow(non_snake_case)]

use super::*;

const SAMPLE_DOCUMENT: &str = r#"{
  "User": {
    "description": "A registered user.",
    "type": "object",
    "properties": {
      "name": {"type": "string"},
      "tags": {"type": "array", "items": {"type": "string"}}
    },
    "required": ["name"],
    "additionalProperties": false
  },
  "Anything": true
}"#;

fn write_document(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("schemas.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn load_document___valid_file___preserves_entry_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(&dir, SAMPLE_DOCUMENT);

    let document = load_document(&path).unwrap();

    let names: Vec<&str> = document.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["User", "Anything"]);
}

#[test]
fn load_document___missing_file___fails_with_context() {
    let err = load_document(Path::new("/nonexistent/schemas.json")).unwrap_err();

    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn load_document___malformed_json___fails_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(&dir, "{not json");

    let err = load_document(&path).unwrap_err();

    assert!(err.to_string().contains("Failed to parse schema document"));
}

#[test]
fn render_document___sample___renders_each_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(&dir, SAMPLE_DOCUMENT);
    let document = load_document(&path).unwrap();

    let rendered = render_document(&document, "export").unwrap();

    assert!(rendered.contains("/** A registered user. */\nexport type User = {\n"));
    assert!(rendered.contains("  name: string;\n"));
    assert!(rendered.contains("  tags?: string[];\n"));
    assert!(rendered.contains("export type Anything = unknown"));
    assert!(rendered.ends_with("}\n\nexport type Anything = unknown\n"));
}

#[test]
fn render_document___custom_prefix___is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(&dir, r#"{"Flag": {"type": "boolean"}}"#);
    let document = load_document(&path).unwrap();

    let rendered = render_document(&document, "declare").unwrap();

    assert_eq!(rendered, "declare type Flag = boolean\n");
}

#[test]
fn render_document___unrenderable_schema___fails_with_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(&dir, r#"{"Broken": {"type": "object"}}"#);
    let document = load_document(&path).unwrap();

    let err = render_document(&document, "export").unwrap_err();

    assert!(err.to_string().contains("`Broken`"));
}

#[test]
fn run___sample_document___writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_document(&dir, SAMPLE_DOCUMENT);
    let output = dir.path().join("types.d.ts");

    run(
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "export",
    )
    .unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("/** A registered user. */\nexport type User = {"));
}
