//! TypeScript declaration generation from schema documents.

use typebridge::{SchemaDoc, SchemaNode, SchemaType, StructuralError, StructuralResult};

/// Render a full type declaration: doc comment, prefix, rendered type.
///
/// The prefix carries everything up to the type expression, e.g.
/// `"export type User = "`.
pub fn render_declaration(
    node: &SchemaNode,
    declaration_prefix: &str,
) -> StructuralResult<String> {
    let mut out = String::new();
    if let Some(doc) = node.as_doc()
        && let Some(description) = &doc.description
    {
        out.push_str(&doc_comment(description, 0));
    }
    out.push_str(declaration_prefix);
    out.push_str(&render_type(node, 0)?);
    Ok(out)
}

/// Render a schema node as a TypeScript type expression.
///
/// `indent` is the brace-nesting level of the surrounding context; field
/// lists indent their members one level deeper.
pub fn render_type(node: &SchemaNode, indent: usize) -> StructuralResult<String> {
    match node {
        SchemaNode::Any => Ok("unknown".to_string()),
        SchemaNode::Never => Ok("never".to_string()),
        SchemaNode::Doc(doc) => render_doc(doc, indent),
    }
}

fn render_doc(doc: &SchemaDoc, indent: usize) -> StructuralResult<String> {
    let Some(schema_type) = doc.schema_type else {
        return Ok("unknown".to_string());
    };
    match schema_type {
        SchemaType::Boolean => Ok("boolean".to_string()),
        SchemaType::Integer | SchemaType::Number => Ok("number".to_string()),
        SchemaType::Null => Ok("null".to_string()),
        SchemaType::String => Ok(render_string(doc)),
        SchemaType::Array => {
            let items = match &doc.items {
                Some(items) => render_type(items, indent)?,
                None => "unknown".to_string(),
            };
            Ok(format!("{items}[]"))
        }
        SchemaType::Object => render_object(doc, indent),
    }
}

fn render_string(doc: &SchemaDoc) -> String {
    if !doc.enum_values.is_empty() {
        return doc
            .enum_values
            .iter()
            .map(|value| format!("\"{value}\""))
            .collect::<Vec<_>>()
            .join(" | ");
    }
    match doc.format.as_deref() {
        Some("date-time") => "Date".to_string(),
        Some("binary") => "Uint8Array".to_string(),
        _ => "string".to_string(),
    }
}

fn render_object(doc: &SchemaDoc, indent: usize) -> StructuralResult<String> {
    match doc.additional_properties.as_deref() {
        Some(SchemaNode::Any) => Ok("Record<string, unknown>".to_string()),
        Some(SchemaNode::Never) | None if !doc.properties.is_empty() => {
            render_field_list(doc, indent)
        }
        Some(SchemaNode::Never) => Ok("Record<string, never>".to_string()),
        Some(elem @ SchemaNode::Doc(_)) => {
            Ok(format!("Record<string, {}>", render_type(elem, indent)?))
        }
        None => Err(StructuralError::InvalidSchema(
            "object with neither properties nor additionalProperties".to_string(),
        )),
    }
}

fn render_field_list(doc: &SchemaDoc, indent: usize) -> StructuralResult<String> {
    let field_pad = "  ".repeat(indent + 1);
    let mut out = String::from("{\n");
    for (name, child) in &doc.properties {
        if let Some(child_doc) = child.as_doc()
            && let Some(description) = &child_doc.description
        {
            out.push_str(&doc_comment(description, indent + 1));
        }
        let marker = if doc.required.iter().any(|required| required == name) {
            ""
        } else {
            "?"
        };
        let rendered = render_type(child, indent + 1)?;
        out.push_str(&format!("{field_pad}{name}{marker}: {rendered};\n"));
    }
    out.push_str(&"  ".repeat(indent));
    out.push('}');
    Ok(out)
}

/// Render a doc comment: one-liner for single-line descriptions, a block
/// with one ` * ` line per input line otherwise. Empty input renders nothing.
fn doc_comment(description: &str, indent: usize) -> String {
    if description.is_empty() {
        return String::new();
    }
    let pad = "  ".repeat(indent);
    let lines: Vec<&str> = description.lines().collect();
    match lines.as_slice() {
        [] => String::new(),
        [line] => format!("{pad}/** {line} */\n"),
        lines => {
            let mut out = format!("{pad}/**\n");
            for line in lines {
                out.push_str(&format!("{pad} * {line}\n"));
            }
            out.push_str(&format!("{pad} */\n"));
            out
        }
    }
}
