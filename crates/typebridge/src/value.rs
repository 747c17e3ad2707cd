//! The generic, JSON-like dynamic value representation
//!
//! [`GenericValue`] is the closed union every structural conversion targets
//! or originates from. Maps preserve insertion order on output; lookups are
//! by key. The textual JSON mapping is provided through [`serde`]: scalars
//! map to the matching JSON literal, byte strings encode as base64 text,
//! lists and maps map to JSON arrays/objects with key order preserved.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamic, language-neutral value
#[derive(Debug, Clone, PartialEq)]
pub enum GenericValue {
    /// Absent / null
    Null,
    /// Boolean
    Bool(bool),
    /// Signed 64-bit integer
    Int(i64),
    /// Unsigned 64-bit integer
    UInt(u64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 string
    Str(String),
    /// Opaque byte string; encodes as base64 text in JSON
    Bytes(Vec<u8>),
    /// Ordered list
    List(Vec<GenericValue>),
    /// String-keyed map, insertion order preserved
    Map(IndexMap<String, GenericValue>),
}

impl GenericValue {
    /// Short label for this value's shape, used in mismatch errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            GenericValue::Null => "null",
            GenericValue::Bool(_) => "bool",
            GenericValue::Int(_) => "int",
            GenericValue::UInt(_) => "uint",
            GenericValue::Float(_) => "float",
            GenericValue::Str(_) => "string",
            GenericValue::Bytes(_) => "bytes",
            GenericValue::List(_) => "array",
            GenericValue::Map(_) => "object",
        }
    }

    /// Look up a map entry by key; `None` for non-map values
    pub fn get(&self, key: &str) -> Option<&GenericValue> {
        match self {
            GenericValue::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Encode to a JSON text blob
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode from a JSON text blob
    pub fn from_json_str(text: &str) -> serde_json::Result<GenericValue> {
        serde_json::from_str(text)
    }
}

impl From<bool> for GenericValue {
    fn from(value: bool) -> Self {
        GenericValue::Bool(value)
    }
}

impl From<i64> for GenericValue {
    fn from(value: i64) -> Self {
        GenericValue::Int(value)
    }
}

impl From<u64> for GenericValue {
    fn from(value: u64) -> Self {
        GenericValue::UInt(value)
    }
}

impl From<f64> for GenericValue {
    fn from(value: f64) -> Self {
        GenericValue::Float(value)
    }
}

impl From<&str> for GenericValue {
    fn from(value: &str) -> Self {
        GenericValue::Str(value.to_string())
    }
}

impl From<String> for GenericValue {
    fn from(value: String) -> Self {
        GenericValue::Str(value)
    }
}

impl Serialize for GenericValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GenericValue::Null => serializer.serialize_unit(),
            GenericValue::Bool(b) => serializer.serialize_bool(*b),
            GenericValue::Int(i) => serializer.serialize_i64(*i),
            GenericValue::UInt(u) => serializer.serialize_u64(*u),
            GenericValue::Float(f) => serializer.serialize_f64(*f),
            GenericValue::Str(s) => serializer.serialize_str(s),
            GenericValue::Bytes(bytes) => serializer.serialize_str(&BASE64.encode(bytes)),
            GenericValue::List(items) => serializer.collect_seq(items),
            GenericValue::Map(map) => serializer.collect_map(map),
        }
    }
}

struct GenericValueVisitor;

impl<'de> Visitor<'de> for GenericValueVisitor {
    type Value = GenericValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<GenericValue, E> {
        Ok(GenericValue::Null)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<GenericValue, E> {
        Ok(GenericValue::Null)
    }

    fn visit_bool<E: serde::de::Error>(self, value: bool) -> Result<GenericValue, E> {
        Ok(GenericValue::Bool(value))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<GenericValue, E> {
        Ok(GenericValue::Int(value))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<GenericValue, E> {
        if let Ok(signed) = i64::try_from(value) {
            Ok(GenericValue::Int(signed))
        } else {
            Ok(GenericValue::UInt(value))
        }
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<GenericValue, E> {
        Ok(GenericValue::Float(value))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<GenericValue, E> {
        Ok(GenericValue::Str(value.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<GenericValue, E> {
        Ok(GenericValue::Str(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<GenericValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(GenericValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<GenericValue, A::Error> {
        let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, GenericValue>()? {
            map.insert(key, value);
        }
        Ok(GenericValue::Map(map))
    }
}

impl<'de> Deserialize<'de> for GenericValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(GenericValueVisitor)
    }
}
