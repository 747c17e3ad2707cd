//! Schema document model and its JSON serialization
//!
//! A [`SchemaNode`] is either a universal sentinel ([`Any`] accepts every
//! value and serializes as the literal `true`; [`Never`] accepts none and
//! serializes as `false`) or a structured [`SchemaDoc`].
//! Structured documents omit empty/default fields when written; reading
//! recognizes the two boolean literals before attempting structured
//! decoding, so a sentinel round-trips to the same sentinel and never to a
//! structured node with empty fields.
//!
//! [`Any`]: SchemaNode::Any
//! [`Never`]: SchemaNode::Never

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON-Schema-like declarative description of a type's shape
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Universal schema accepting any value; the literal `true`
    Any,
    /// Universal schema accepting no value; the literal `false`
    Never,
    /// A structured schema document
    Doc(SchemaDoc),
}

/// The `type` keyword of a structured schema document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
    Null,
}

/// A structured schema document; empty/default fields are omitted on write
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    /// Refinement of `type`: `int32`, `int64`, `float`, `double`,
    /// `date-time`, `binary`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Closed set of allowed string literals, in declaration order
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    /// Element schema, for `array`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    /// Exact length bounds for fixed-length arrays; always equal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,

    /// Property schemas in field declaration order, for `object`
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,

    /// Names of required properties, in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Schema for undeclared keys; a sentinel closes or opens the object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// Whether this node is one of the two universal sentinels
    pub fn is_sentinel(&self) -> bool {
        matches!(self, SchemaNode::Any | SchemaNode::Never)
    }

    /// The structured document, if this node is not a sentinel
    pub fn as_doc(&self) -> Option<&SchemaDoc> {
        match self {
            SchemaNode::Doc(doc) => Some(doc),
            _ => None,
        }
    }

    /// Encode to a JSON text blob
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode from a JSON text blob
    pub fn from_json_str(text: &str) -> serde_json::Result<SchemaNode> {
        serde_json::from_str(text)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SchemaNode::Any => serializer.serialize_bool(true),
            SchemaNode::Never => serializer.serialize_bool(false),
            SchemaNode::Doc(doc) => doc.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Sentinel(bool),
            Doc(SchemaDoc),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Sentinel(true) => Ok(SchemaNode::Any),
            Repr::Sentinel(false) => Ok(SchemaNode::Never),
            Repr::Doc(doc) => Ok(SchemaNode::Doc(doc)),
        }
    }
}

#[cfg(test)]
#[path = "schema/schema_tests.rs"]
mod schema_tests;
