//! Bidirectional conversion between native and generic values
//!
//! This module implements the two halves of the structural converter:
//!
//! - [`to_generic`]: recursively descend a [`TypeDescriptor`] and render a
//!   [`NativeValue`] into the generic, JSON-like representation, honoring
//!   per-field serialization directives (rename, optional, omit).
//! - [`from_generic`]: the inverse, with an intentionally asymmetric
//!   acceptance policy: scalar targets also accept their textual form (or a
//!   one-element string list, the query-string/form binding path), variable
//!   sequences and maps accept `null` as empty, and record decoding is
//!   closed-world: input keys not declared by the target type are rejected.
//!
//! Both directions are pure recursive tree walks over caller-owned inputs.
//! The only external state touched is the wall clock, for `updatedAt` /
//! `createdAt` stamping, and the read-only version capability attached to a
//! record descriptor at registration. Errors never lose their origin: every
//! recursive call site wraps child failures with the field name, list index,
//! or map key on the way out.
//!
//! Type graphs are expected to be acyclic; recursion past [`MAX_NESTING`]
//! levels fails with an unsupported-shape error instead of overflowing the
//! stack.

use crate::MAX_NESTING;
use crate::descriptor::{Kind, RecordSpec, TypeDescriptor, lower_camel_case};
use crate::error::{StructuralError, StructuralResult};
use crate::native::NativeValue;
use crate::value::GenericValue;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Wire name of the stamped record version entry
const VERSION_KEY: &str = "version";
/// Wire name stamped with the wall clock on every write
const UPDATED_AT_KEY: &str = "updatedAt";
/// Wire name stamped with the wall clock on create only
const CREATED_AT_KEY: &str = "createdAt";

/// Convert a native value into its generic representation.
///
/// `is_create` selects create semantics for conventionally-named timestamp
/// fields: `createdAt` is stamped with the current wall clock only when
/// `is_create` is true, while `updatedAt` is stamped on every conversion.
pub fn to_generic(
    value: &NativeValue,
    descriptor: &TypeDescriptor,
    is_create: bool,
) -> StructuralResult<GenericValue> {
    encode_value(value, descriptor, is_create, 0)
}

/// Convert a generic value back into a native value shaped by `descriptor`
pub fn from_generic(
    generic: &GenericValue,
    descriptor: &TypeDescriptor,
) -> StructuralResult<NativeValue> {
    decode_value(generic, descriptor, 0)
}

fn depth_guard(depth: usize) -> StructuralResult<()> {
    if depth > MAX_NESTING {
        return Err(StructuralError::Unsupported(format!(
            "nesting deeper than {MAX_NESTING} levels"
        )));
    }
    Ok(())
}

fn mismatch_native(expected: impl Into<String>, got: &NativeValue) -> StructuralError {
    StructuralError::mismatch(expected, got.kind_name())
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn encode_value(
    value: &NativeValue,
    descriptor: &TypeDescriptor,
    is_create: bool,
    depth: usize,
) -> StructuralResult<GenericValue> {
    depth_guard(depth)?;
    match &descriptor.kind {
        Kind::Bool => match value {
            NativeValue::Bool(b) => Ok(GenericValue::Bool(*b)),
            other => Err(mismatch_native("bool", other)),
        },
        Kind::Int(_) => match value {
            NativeValue::I64(i) => Ok(GenericValue::Int(*i)),
            other => Err(mismatch_native(descriptor.kind.label(), other)),
        },
        Kind::UInt(_) => match value {
            NativeValue::U64(u) => Ok(GenericValue::UInt(*u)),
            other => Err(mismatch_native(descriptor.kind.label(), other)),
        },
        Kind::Float(_) => match value {
            NativeValue::F64(f) => Ok(GenericValue::Float(*f)),
            other => Err(mismatch_native(descriptor.kind.label(), other)),
        },
        Kind::Str | Kind::Enum(_) => match value {
            NativeValue::Str(s) => Ok(GenericValue::Str(s.clone())),
            other => Err(mismatch_native("string", other)),
        },
        Kind::Bytes => match value {
            NativeValue::Bytes(bytes) => Ok(GenericValue::Bytes(bytes.clone())),
            other => Err(mismatch_native("bytes", other)),
        },
        Kind::Timestamp => match value {
            NativeValue::Timestamp(ts) => Ok(GenericValue::Str(format_timestamp(ts))),
            other => Err(mismatch_native("timestamp", other)),
        },
        Kind::FixedSeq(elem, len) => match value {
            NativeValue::Seq(items) if items.len() == *len => encode_elements(items, elem, is_create, depth),
            NativeValue::Seq(items) => Err(StructuralError::mismatch(
                format!("array of length {len}"),
                format!("array of length {}", items.len()),
            )),
            other => Err(mismatch_native(descriptor.kind.label(), other)),
        },
        Kind::Seq(elem) => match value {
            NativeValue::Seq(items) => encode_elements(items, elem, is_create, depth),
            other => Err(mismatch_native("array", other)),
        },
        Kind::Map(elem) => match value {
            NativeValue::Map(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (key, entry) in map {
                    let encoded = encode_value(entry, elem, is_create, depth + 1)
                        .map_err(|e| e.at(key.clone()))?;
                    out.insert(key.clone(), encoded);
                }
                Ok(GenericValue::Map(out))
            }
            other => Err(mismatch_native("object", other)),
        },
        Kind::Optional(inner) => match value {
            NativeValue::Null => Ok(GenericValue::Null),
            present => encode_value(present, inner, is_create, depth + 1),
        },
        Kind::Dynamic => encode_dynamic(value, is_create, depth + 1),
        Kind::Record(spec) => encode_record(value, spec, is_create, depth),
        Kind::Opaque(name) => Err(StructuralError::Unsupported(name.clone())),
    }
}

fn encode_elements(
    items: &[NativeValue],
    elem: &TypeDescriptor,
    is_create: bool,
    depth: usize,
) -> StructuralResult<GenericValue> {
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let encoded =
            encode_value(item, elem, is_create, depth + 1).map_err(|e| e.at_index(index))?;
        out.push(encoded);
    }
    Ok(GenericValue::List(out))
}

fn encode_record(
    value: &NativeValue,
    spec: &RecordSpec,
    is_create: bool,
    depth: usize,
) -> StructuralResult<GenericValue> {
    let NativeValue::Record(record) = value else {
        return Err(mismatch_native("record", value));
    };

    let mut out = IndexMap::new();
    if let Some(versioning) = &spec.versioning {
        out.insert(
            VERSION_KEY.to_string(),
            GenericValue::UInt(versioning.current_version()),
        );
    }

    for field in &spec.fields {
        if field.omit {
            continue;
        }
        let wire = field.wire_name();
        let mut field_value = record
            .get(&field.name)
            .cloned()
            .unwrap_or_else(|| NativeValue::zero_of(&field.ty));

        if matches!(field.ty.kind, Kind::Timestamp)
            && (wire == UPDATED_AT_KEY || (is_create && wire == CREATED_AT_KEY))
        {
            field_value = NativeValue::Timestamp(Utc::now());
        }

        if field.optional && field_value.is_zero() {
            continue;
        }

        let encoded = encode_value(&field_value, &field.ty, is_create, depth + 1)
            .map_err(|e| e.at(wire.clone()))?;
        out.insert(wire, encoded);
    }
    Ok(GenericValue::Map(out))
}

/// Convert a dynamic-slot value by inspecting its concrete shape.
///
/// Re-entry is a normal recursive call over the closed [`NativeValue`]
/// union. Records reached through a dynamic slot carry no field specs, so
/// their keys take the default wire form of their declared names.
fn encode_dynamic(
    value: &NativeValue,
    is_create: bool,
    depth: usize,
) -> StructuralResult<GenericValue> {
    depth_guard(depth)?;
    match value {
        NativeValue::Null => Ok(GenericValue::Null),
        NativeValue::Bool(b) => Ok(GenericValue::Bool(*b)),
        NativeValue::I64(i) => Ok(GenericValue::Int(*i)),
        NativeValue::U64(u) => Ok(GenericValue::UInt(*u)),
        NativeValue::F64(f) => Ok(GenericValue::Float(*f)),
        NativeValue::Str(s) => Ok(GenericValue::Str(s.clone())),
        NativeValue::Bytes(bytes) => Ok(GenericValue::Bytes(bytes.clone())),
        NativeValue::Timestamp(ts) => Ok(GenericValue::Str(format_timestamp(ts))),
        NativeValue::Seq(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let encoded =
                    encode_dynamic(item, is_create, depth + 1).map_err(|e| e.at_index(index))?;
                out.push(encoded);
            }
            Ok(GenericValue::List(out))
        }
        NativeValue::Map(map) => {
            let mut out = IndexMap::with_capacity(map.len());
            for (key, entry) in map {
                let encoded =
                    encode_dynamic(entry, is_create, depth + 1).map_err(|e| e.at(key.clone()))?;
                out.insert(key.clone(), encoded);
            }
            Ok(GenericValue::Map(out))
        }
        NativeValue::Record(fields) => {
            let mut out = IndexMap::with_capacity(fields.len());
            for (name, entry) in fields {
                let encoded =
                    encode_dynamic(entry, is_create, depth + 1).map_err(|e| e.at(name.clone()))?;
                out.insert(lower_camel_case(name), encoded);
            }
            Ok(GenericValue::Map(out))
        }
        NativeValue::Opaque(name) => Err(StructuralError::Unsupported(name.clone())),
    }
}

/// Pull the textual form out of a scalar input: a string, or a one-element
/// string list (multi-valued bindings collapse to their single element).
fn coerced_text<'a>(generic: &'a GenericValue, expected: &str) -> StructuralResult<&'a str> {
    match generic {
        GenericValue::Str(s) => Ok(s),
        GenericValue::List(items) => match items.as_slice() {
            [GenericValue::Str(s)] => Ok(s),
            _ => Err(StructuralError::mismatch(
                expected,
                format!("array of length {}", items.len()),
            )),
        },
        other => Err(StructuralError::mismatch(expected, other.kind_name())),
    }
}

fn decode_value(
    generic: &GenericValue,
    descriptor: &TypeDescriptor,
    depth: usize,
) -> StructuralResult<NativeValue> {
    depth_guard(depth)?;
    match &descriptor.kind {
        Kind::Bool => match generic {
            GenericValue::Bool(b) => Ok(NativeValue::Bool(*b)),
            other => {
                let text = coerced_text(other, "bool")?;
                text.parse::<bool>()
                    .map(NativeValue::Bool)
                    .map_err(|_| StructuralError::mismatch("bool", format!("\"{text}\"")))
            }
        },
        Kind::Int(_) => {
            let expected = descriptor.kind.label();
            match generic {
                GenericValue::Int(i) => Ok(NativeValue::I64(*i)),
                GenericValue::UInt(u) => i64::try_from(*u)
                    .map(NativeValue::I64)
                    .map_err(|_| StructuralError::mismatch(expected, "uint")),
                other => {
                    let text = coerced_text(other, &expected)?;
                    text.parse::<i64>()
                        .map(NativeValue::I64)
                        .map_err(|_| StructuralError::mismatch(expected.as_str(), format!("\"{text}\"")))
                }
            }
        }
        Kind::UInt(_) => {
            let expected = descriptor.kind.label();
            match generic {
                GenericValue::UInt(u) => Ok(NativeValue::U64(*u)),
                GenericValue::Int(i) => u64::try_from(*i)
                    .map(NativeValue::U64)
                    .map_err(|_| StructuralError::mismatch(expected, "negative int")),
                other => {
                    let text = coerced_text(other, &expected)?;
                    text.parse::<u64>()
                        .map(NativeValue::U64)
                        .map_err(|_| StructuralError::mismatch(expected.as_str(), format!("\"{text}\"")))
                }
            }
        }
        Kind::Float(_) => {
            let expected = descriptor.kind.label();
            match generic {
                GenericValue::Float(f) => Ok(NativeValue::F64(*f)),
                GenericValue::Int(i) => Ok(NativeValue::F64(*i as f64)),
                GenericValue::UInt(u) => Ok(NativeValue::F64(*u as f64)),
                other => {
                    let text = coerced_text(other, &expected)?;
                    text.parse::<f64>()
                        .map(NativeValue::F64)
                        .map_err(|_| StructuralError::mismatch(expected.as_str(), format!("\"{text}\"")))
                }
            }
        }
        Kind::Str => {
            let text = coerced_text(generic, "string")?;
            Ok(NativeValue::Str(text.to_string()))
        }
        Kind::Enum(members) => {
            let text = coerced_text(generic, "string")?;
            if members.iter().any(|member| member == text) {
                Ok(NativeValue::Str(text.to_string()))
            } else {
                Err(StructuralError::InvalidEnum(text.to_string()))
            }
        }
        Kind::Bytes => match generic {
            GenericValue::Bytes(bytes) => Ok(NativeValue::Bytes(bytes.clone())),
            other => {
                let text = coerced_text(other, "base64 string")?;
                BASE64
                    .decode(text)
                    .map(NativeValue::Bytes)
                    .map_err(|_| StructuralError::mismatch("base64 string", format!("\"{text}\"")))
            }
        },
        Kind::Timestamp => {
            let text = coerced_text(generic, "RFC 3339 timestamp")?;
            DateTime::parse_from_rfc3339(text)
                .map(|ts| NativeValue::Timestamp(ts.with_timezone(&Utc)))
                .map_err(|_| {
                    StructuralError::mismatch("RFC 3339 timestamp", format!("\"{text}\""))
                })
        }
        Kind::FixedSeq(elem, len) => match generic {
            GenericValue::List(items) => {
                if items.len() != *len {
                    return Err(StructuralError::mismatch(
                        format!("array of length {len}"),
                        format!("array of length {}", items.len()),
                    ));
                }
                decode_elements(items, elem, depth)
            }
            other => Err(StructuralError::mismatch(
                descriptor.kind.label(),
                other.kind_name(),
            )),
        },
        Kind::Seq(elem) => match generic {
            GenericValue::Null => Ok(NativeValue::Seq(Vec::new())),
            GenericValue::List(items) => decode_elements(items, elem, depth),
            other => Err(StructuralError::mismatch("array", other.kind_name())),
        },
        Kind::Map(elem) => match generic {
            GenericValue::Null => Ok(NativeValue::Map(IndexMap::new())),
            GenericValue::Map(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (key, entry) in map {
                    let decoded =
                        decode_value(entry, elem, depth + 1).map_err(|e| e.at(key.clone()))?;
                    out.insert(key.clone(), decoded);
                }
                Ok(NativeValue::Map(out))
            }
            other => Err(StructuralError::mismatch("object", other.kind_name())),
        },
        Kind::Optional(inner) => match generic {
            GenericValue::Null => Ok(NativeValue::Null),
            present => decode_value(present, inner, depth + 1),
        },
        Kind::Dynamic => match generic {
            GenericValue::Null => Ok(NativeValue::Null),
            stored => Ok(NativeValue::adopt(stored)),
        },
        Kind::Record(spec) => decode_record(generic, spec, depth),
        Kind::Opaque(name) => Err(StructuralError::Unsupported(name.clone())),
    }
}

fn decode_elements(
    items: &[GenericValue],
    elem: &TypeDescriptor,
    depth: usize,
) -> StructuralResult<NativeValue> {
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let decoded = decode_value(item, elem, depth + 1).map_err(|e| e.at_index(index))?;
        out.push(decoded);
    }
    Ok(NativeValue::Seq(out))
}

fn decode_record(
    generic: &GenericValue,
    spec: &RecordSpec,
    depth: usize,
) -> StructuralResult<NativeValue> {
    let GenericValue::Map(map) = generic else {
        return Err(StructuralError::mismatch("object", generic.kind_name()));
    };

    match &spec.versioning {
        Some(versioning) => {
            let mut working = map.clone();
            let found = match working.shift_remove(VERSION_KEY) {
                Some(GenericValue::UInt(v)) => v,
                Some(GenericValue::Int(v)) if v >= 0 => v as u64,
                Some(other) => {
                    return Err(
                        StructuralError::mismatch("version number", other.kind_name())
                            .at(VERSION_KEY),
                    );
                }
                None => 0,
            };
            if found < versioning.current_version() {
                versioning.migrate(found, &mut working)?;
            }
            decode_record_fields(&working, spec, depth)
        }
        None => decode_record_fields(map, spec, depth),
    }
}

fn decode_record_fields(
    map: &IndexMap<String, GenericValue>,
    spec: &RecordSpec,
    depth: usize,
) -> StructuralResult<NativeValue> {
    let mut out = IndexMap::with_capacity(spec.fields.len());
    let mut consumed: HashSet<String> = HashSet::with_capacity(spec.fields.len());

    for field in &spec.fields {
        if field.omit {
            // Never serialized, so never read; lands at its zero value.
            out.insert(field.name.clone(), NativeValue::zero_of(&field.ty));
            continue;
        }
        let wire = field.wire_name();
        let value = match map.get(&wire) {
            Some(entry) => {
                decode_value(entry, &field.ty, depth + 1).map_err(|e| e.at(wire.clone()))?
            }
            None if field.optional => NativeValue::zero_of(&field.ty),
            None => return Err(StructuralError::MissingField(wire)),
        };
        consumed.insert(wire);
        out.insert(field.name.clone(), value);
    }

    for key in map.keys() {
        if !consumed.contains(key) {
            return Err(StructuralError::UnknownField(key.clone()));
        }
    }
    Ok(NativeValue::Record(out))
}

#[cfg(test)]
#[path = "convert/convert_tests.rs"]
mod convert_tests;
