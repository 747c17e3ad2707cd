//! Schema derivation from type descriptors
//!
//! [`derive_schema`] walks a [`TypeDescriptor`] and produces the matching
//! [`SchemaNode`] tree. Derivation is deterministic: property and
//! required-list order exactly follow field declaration order, and two
//! derivations of the same descriptor are structurally identical. Records
//! derive as closed objects (`additionalProperties` = the Accept-Nothing
//! sentinel), mirroring the converter's closed-world decoding. Optionality
//! never changes a node's own shape; it is expressed only through the
//! parent's `required` list.

use crate::MAX_NESTING;
use crate::descriptor::{FloatWidth, IntWidth, Kind, TypeDescriptor};
use crate::docs::DescriptionSource;
use crate::error::{StructuralError, StructuralResult};
use crate::schema::{SchemaDoc, SchemaNode, SchemaType};
use indexmap::IndexMap;

/// Derive the schema document describing `descriptor`.
///
/// `docs` supplies `description` text, keyed by the declared type name and
/// field name; nodes without lookup hits carry no description.
pub fn derive_schema(
    descriptor: &TypeDescriptor,
    docs: &dyn DescriptionSource,
) -> StructuralResult<SchemaNode> {
    derive_node(descriptor, docs, 0)
}

fn scalar_doc(schema_type: SchemaType, format: Option<&str>) -> SchemaDoc {
    SchemaDoc {
        schema_type: Some(schema_type),
        format: format.map(str::to_string),
        ..Default::default()
    }
}

fn int_format(width: IntWidth) -> &'static str {
    match width {
        IntWidth::W8 | IntWidth::W16 | IntWidth::W32 => "int32",
        IntWidth::W64 => "int64",
    }
}

fn derive_node(
    descriptor: &TypeDescriptor,
    docs: &dyn DescriptionSource,
    depth: usize,
) -> StructuralResult<SchemaNode> {
    if depth > MAX_NESTING {
        return Err(StructuralError::Unsupported(format!(
            "nesting deeper than {MAX_NESTING} levels"
        )));
    }

    let mut node = match &descriptor.kind {
        Kind::Bool => SchemaNode::Doc(scalar_doc(SchemaType::Boolean, None)),
        Kind::Int(width) | Kind::UInt(width) => {
            SchemaNode::Doc(scalar_doc(SchemaType::Integer, Some(int_format(*width))))
        }
        Kind::Float(FloatWidth::W32) => SchemaNode::Doc(scalar_doc(SchemaType::Number, Some("float"))),
        Kind::Float(FloatWidth::W64) => {
            SchemaNode::Doc(scalar_doc(SchemaType::Number, Some("double")))
        }
        Kind::Str => SchemaNode::Doc(scalar_doc(SchemaType::String, None)),
        Kind::Bytes => SchemaNode::Doc(scalar_doc(SchemaType::String, Some("binary"))),
        Kind::Timestamp => SchemaNode::Doc(scalar_doc(SchemaType::String, Some("date-time"))),
        Kind::Enum(members) => SchemaNode::Doc(SchemaDoc {
            schema_type: Some(SchemaType::String),
            enum_values: members.clone(),
            ..Default::default()
        }),
        Kind::FixedSeq(elem, len) => SchemaNode::Doc(SchemaDoc {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(derive_node(elem, docs, depth + 1)?)),
            min_items: Some(*len),
            max_items: Some(*len),
            ..Default::default()
        }),
        Kind::Seq(elem) => SchemaNode::Doc(SchemaDoc {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(derive_node(elem, docs, depth + 1)?)),
            ..Default::default()
        }),
        Kind::Map(elem) => SchemaNode::Doc(SchemaDoc {
            schema_type: Some(SchemaType::Object),
            additional_properties: Some(Box::new(derive_node(elem, docs, depth + 1)?)),
            ..Default::default()
        }),
        // Optionality is the parent's concern (its `required` list), not a
        // shape of its own.
        Kind::Optional(inner) => return derive_node(inner, docs, depth),
        Kind::Dynamic => return Ok(SchemaNode::Any),
        Kind::Record(spec) => {
            let type_path = descriptor.name.as_deref();
            let mut properties = IndexMap::new();
            let mut required = Vec::new();
            for field in &spec.fields {
                if field.omit {
                    continue;
                }
                let wire = field.wire_name();
                let mut child = derive_node(&field.ty, docs, depth + 1)
                    .map_err(|e| e.at(wire.clone()))?;
                if let SchemaNode::Doc(child_doc) = &mut child {
                    child_doc.title = Some(wire.clone());
                    if let Some(type_path) = type_path
                        && let Some(text) = docs.describe(type_path, Some(&field.name))
                    {
                        child_doc.description = Some(text);
                    }
                }
                if !field.optional {
                    required.push(wire.clone());
                }
                properties.insert(wire, child);
            }
            SchemaNode::Doc(SchemaDoc {
                schema_type: Some(SchemaType::Object),
                properties,
                required,
                additional_properties: Some(Box::new(SchemaNode::Never)),
                ..Default::default()
            })
        }
        Kind::Opaque(name) => return Err(StructuralError::Unsupported(name.clone())),
    };

    if let SchemaNode::Doc(doc) = &mut node {
        if doc.title.is_none() {
            doc.title = descriptor.name.clone();
        }
        if doc.description.is_none()
            && let Some(name) = &descriptor.name
        {
            doc.description = docs.describe(name, None);
        }
    }
    Ok(node)
}
