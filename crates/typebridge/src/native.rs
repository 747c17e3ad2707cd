//! The closed concrete-value representation of the native side
//!
//! Every supported native shape maps into [`NativeValue`] before it meets
//! the converter. Dynamic-slot re-entry is a normal recursive call over this
//! closed union, never open-ended dispatch: the converter resolves a fresh
//! concrete kind from the value itself. Each descriptor kind has a zero
//! value, used when an optional field is absent on read and by the
//! zero-valued-omission rule on write.

use crate::descriptor::{Kind, TypeDescriptor};
use crate::value::GenericValue;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// A natively-typed value, lifted into the engine's closed union
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// Absent optional / zero dynamic value
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
    /// Sequence (fixed- or variable-length)
    Seq(Vec<NativeValue>),
    /// String-keyed map, insertion order preserved
    Map(IndexMap<String, NativeValue>),
    /// Record value keyed by declared field name, in declaration order
    Record(IndexMap<String, NativeValue>),
    Timestamp(DateTime<Utc>),
    /// A host value the engine cannot destructure; conversion always fails
    Opaque(String),
}

impl NativeValue {
    /// Short label for this value's shape, used in mismatch errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Bool(_) => "bool",
            NativeValue::I64(_) => "int",
            NativeValue::U64(_) => "uint",
            NativeValue::F64(_) => "float",
            NativeValue::Str(_) => "string",
            NativeValue::Bytes(_) => "bytes",
            NativeValue::Seq(_) => "array",
            NativeValue::Map(_) => "object",
            NativeValue::Record(_) => "record",
            NativeValue::Timestamp(_) => "timestamp",
            NativeValue::Opaque(_) => "opaque",
        }
    }

    /// Whether this value equals its kind's zero value.
    ///
    /// Records are zero iff every field is zero; the zero timestamp is the
    /// Unix epoch.
    pub fn is_zero(&self) -> bool {
        match self {
            NativeValue::Null => true,
            NativeValue::Bool(b) => !b,
            NativeValue::I64(i) => *i == 0,
            NativeValue::U64(u) => *u == 0,
            NativeValue::F64(f) => *f == 0.0,
            NativeValue::Str(s) => s.is_empty(),
            NativeValue::Bytes(bytes) => bytes.is_empty(),
            NativeValue::Seq(items) => items.is_empty(),
            NativeValue::Map(map) => map.is_empty(),
            NativeValue::Record(fields) => fields.values().all(NativeValue::is_zero),
            NativeValue::Timestamp(ts) => *ts == DateTime::UNIX_EPOCH,
            NativeValue::Opaque(_) => false,
        }
    }

    /// The zero value of a descriptor's kind
    pub fn zero_of(descriptor: &TypeDescriptor) -> NativeValue {
        match &descriptor.kind {
            Kind::Bool => NativeValue::Bool(false),
            Kind::Int(_) => NativeValue::I64(0),
            Kind::UInt(_) => NativeValue::U64(0),
            Kind::Float(_) => NativeValue::F64(0.0),
            Kind::Str | Kind::Enum(_) => NativeValue::Str(String::new()),
            Kind::Bytes => NativeValue::Bytes(Vec::new()),
            Kind::FixedSeq(elem, len) => {
                NativeValue::Seq(vec![NativeValue::zero_of(elem); *len])
            }
            Kind::Seq(_) => NativeValue::Seq(Vec::new()),
            Kind::Map(_) => NativeValue::Map(IndexMap::new()),
            Kind::Optional(_) | Kind::Dynamic => NativeValue::Null,
            Kind::Record(spec) => NativeValue::Record(
                spec.fields
                    .iter()
                    .map(|field| (field.name.clone(), NativeValue::zero_of(&field.ty)))
                    .collect(),
            ),
            Kind::Timestamp => NativeValue::Timestamp(DateTime::UNIX_EPOCH),
            Kind::Opaque(name) => NativeValue::Opaque(name.clone()),
        }
    }

    /// Adopt a generic value verbatim, without descriptor interpretation.
    ///
    /// Used for dynamic slots on read: the input is stored as-is, with only
    /// the structural shape translated.
    pub fn adopt(generic: &GenericValue) -> NativeValue {
        match generic {
            GenericValue::Null => NativeValue::Null,
            GenericValue::Bool(b) => NativeValue::Bool(*b),
            GenericValue::Int(i) => NativeValue::I64(*i),
            GenericValue::UInt(u) => NativeValue::U64(*u),
            GenericValue::Float(f) => NativeValue::F64(*f),
            GenericValue::Str(s) => NativeValue::Str(s.clone()),
            GenericValue::Bytes(bytes) => NativeValue::Bytes(bytes.clone()),
            GenericValue::List(items) => {
                NativeValue::Seq(items.iter().map(NativeValue::adopt).collect())
            }
            GenericValue::Map(map) => NativeValue::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), NativeValue::adopt(value)))
                    .collect(),
            ),
        }
    }

    /// Build a record value from declared-name/value pairs
    pub fn record<I, S>(fields: I) -> NativeValue
    where
        I: IntoIterator<Item = (S, NativeValue)>,
        S: Into<String>,
    {
        NativeValue::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }
}

impl From<&str> for NativeValue {
    fn from(value: &str) -> Self {
        NativeValue::Str(value.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(value: String) -> Self {
        NativeValue::Str(value)
    }
}
