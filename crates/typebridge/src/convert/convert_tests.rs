#![allow(non_snake_case)]

use super::*;
use crate::descriptor::{FieldSpec, RecordVersioning};
use chrono::TimeZone;
use std::sync::Arc;

fn pair_descriptor() -> TypeDescriptor {
    TypeDescriptor::record(
        "Pair",
        vec![
            FieldSpec::new("a", TypeDescriptor::string()),
            FieldSpec::new("b", TypeDescriptor::optional(TypeDescriptor::int64())).optional(),
        ],
    )
}

fn gmap(entries: &[(&str, GenericValue)]) -> GenericValue {
    GenericValue::Map(
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
    )
}

#[test]
fn to_generic___record___uses_wire_names_in_declaration_order() {
    let descriptor = TypeDescriptor::record(
        "Profile",
        vec![
            FieldSpec::new("display_name", TypeDescriptor::string()),
            FieldSpec::new("user_id", TypeDescriptor::uint64()),
        ],
    );
    let value = NativeValue::record([
        ("display_name", NativeValue::Str("Ada".into())),
        ("user_id", NativeValue::U64(7)),
    ]);

    let generic = to_generic(&value, &descriptor, false).unwrap();

    let GenericValue::Map(map) = generic else {
        panic!("expected map");
    };
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["displayName", "userId"]);
    assert_eq!(map["displayName"], GenericValue::Str("Ada".into()));
    assert_eq!(map["userId"], GenericValue::UInt(7));
}

#[test]
fn to_generic___renamed_field___uses_override() {
    let descriptor = TypeDescriptor::record(
        "Doc",
        vec![FieldSpec::new("body", TypeDescriptor::string()).renamed("content")],
    );
    let value = NativeValue::record([("body", NativeValue::Str("text".into()))]);

    let generic = to_generic(&value, &descriptor, false).unwrap();

    assert_eq!(generic.get("content"), Some(&GenericValue::Str("text".into())));
}

#[test]
fn to_generic___optional_zero_field___is_omitted() {
    let value = NativeValue::record([
        ("a", NativeValue::Str("x".into())),
        ("b", NativeValue::Null),
    ]);

    let generic = to_generic(&value, &pair_descriptor(), false).unwrap();

    let GenericValue::Map(map) = generic else {
        panic!("expected map");
    };
    assert!(!map.contains_key("b"));
    assert_eq!(map.len(), 1);
}

#[test]
fn to_generic___required_empty_collection___is_written() {
    let descriptor = TypeDescriptor::record(
        "Bag",
        vec![FieldSpec::new("tags", TypeDescriptor::seq(TypeDescriptor::string()))],
    );
    let value = NativeValue::record([("tags", NativeValue::Seq(vec![]))]);

    let generic = to_generic(&value, &descriptor, false).unwrap();

    assert_eq!(generic.get("tags"), Some(&GenericValue::List(vec![])));
}

#[test]
fn to_generic___omitted_field___never_serialized() {
    let descriptor = TypeDescriptor::record(
        "Account",
        vec![
            FieldSpec::new("name", TypeDescriptor::string()),
            FieldSpec::new("password_hash", TypeDescriptor::string()).omitted(),
        ],
    );
    let value = NativeValue::record([
        ("name", NativeValue::Str("ada".into())),
        ("password_hash", NativeValue::Str("secret".into())),
    ]);

    let generic = to_generic(&value, &descriptor, false).unwrap();

    let GenericValue::Map(map) = generic else {
        panic!("expected map");
    };
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("name"));
}

#[test]
fn to_generic___byte_string___stays_opaque() {
    let generic = to_generic(
        &NativeValue::Bytes(vec![1, 2, 3]),
        &TypeDescriptor::bytes(),
        false,
    )
    .unwrap();

    assert_eq!(generic, GenericValue::Bytes(vec![1, 2, 3]));
}

#[test]
fn to_generic___map_keys___copied_verbatim() {
    let descriptor = TypeDescriptor::map(TypeDescriptor::int64());
    let mut map = IndexMap::new();
    map.insert("Mixed_Case-Key".to_string(), NativeValue::I64(1));

    let generic = to_generic(&NativeValue::Map(map), &descriptor, false).unwrap();

    assert_eq!(generic.get("Mixed_Case-Key"), Some(&GenericValue::Int(1)));
}

#[test]
fn to_generic___timestamp___renders_rfc3339() {
    let ts = Utc.with_ymd_and_hms(2024, 5, 20, 10, 30, 0).unwrap();

    let generic = to_generic(
        &NativeValue::Timestamp(ts),
        &TypeDescriptor::timestamp(),
        false,
    )
    .unwrap();

    assert_eq!(generic, GenericValue::Str("2024-05-20T10:30:00Z".into()));
}

#[test]
fn to_generic___dynamic_slot___converts_concrete_shape() {
    let value = NativeValue::Seq(vec![NativeValue::I64(1), NativeValue::Str("x".into())]);

    let generic = to_generic(&value, &TypeDescriptor::dynamic(), false).unwrap();

    assert_eq!(
        generic,
        GenericValue::List(vec![GenericValue::Int(1), GenericValue::Str("x".into())])
    );
}

#[test]
fn to_generic___dynamic_record___camel_cases_declared_names() {
    let value = NativeValue::record([("display_name", NativeValue::Str("Ada".into()))]);

    let generic = to_generic(&value, &TypeDescriptor::dynamic(), false).unwrap();

    assert_eq!(
        generic.get("displayName"),
        Some(&GenericValue::Str("Ada".into()))
    );
}

#[test]
fn to_generic___dynamic_opaque___fails_unsupported() {
    let value = NativeValue::Opaque("channel".into());

    let err = to_generic(&value, &TypeDescriptor::dynamic(), false).unwrap_err();

    assert!(matches!(err.root(), StructuralError::Unsupported(name) if name == "channel"));
}

#[test]
fn to_generic___opaque_kind___fails_unsupported() {
    let descriptor = TypeDescriptor::record(
        "Holder",
        vec![FieldSpec::new("callback", TypeDescriptor::opaque("func"))],
    );
    let value = NativeValue::record([("callback", NativeValue::Opaque("func".into()))]);

    let err = to_generic(&value, &descriptor, false).unwrap_err();

    assert!(matches!(err.root(), StructuralError::Unsupported(name) if name == "func"));
    assert_eq!(err.path(), Some("callback"));
}

#[test]
fn to_generic___nested_error___carries_field_path() {
    let descriptor = TypeDescriptor::record(
        "Bag",
        vec![FieldSpec::new("items", TypeDescriptor::seq(TypeDescriptor::string()))],
    );
    let value = NativeValue::record([(
        "items",
        NativeValue::Seq(vec![NativeValue::Str("ok".into()), NativeValue::Bool(true)]),
    )]);

    let err = to_generic(&value, &descriptor, false).unwrap_err();

    assert_eq!(err.path(), Some("items[1]"));
    assert!(matches!(err.root(), StructuralError::TypeMismatch { .. }));
}

struct RenameMigration;

impl RecordVersioning for RenameMigration {
    fn current_version(&self) -> u64 {
        2
    }

    fn migrate(
        &self,
        found: u64,
        map: &mut IndexMap<String, GenericValue>,
    ) -> StructuralResult<()> {
        if found < 2
            && let Some(value) = map.shift_remove("fullName")
        {
            map.insert("name".to_string(), value);
        }
        Ok(())
    }
}

fn versioned_descriptor() -> TypeDescriptor {
    TypeDescriptor::versioned_record(
        "Person",
        vec![FieldSpec::new("name", TypeDescriptor::string())],
        Arc::new(RenameMigration),
    )
}

#[test]
fn to_generic___versioned_record___stamps_version_entry() {
    let value = NativeValue::record([("name", NativeValue::Str("Ada".into()))]);

    let generic = to_generic(&value, &versioned_descriptor(), false).unwrap();

    let GenericValue::Map(map) = generic else {
        panic!("expected map");
    };
    assert_eq!(map["version"], GenericValue::UInt(2));
    assert_eq!(map["name"], GenericValue::Str("Ada".into()));
}

#[test]
fn from_generic___legacy_version___is_migrated() {
    let input = gmap(&[
        ("version", GenericValue::Int(1)),
        ("fullName", GenericValue::Str("Ada".into())),
    ]);

    let value = from_generic(&input, &versioned_descriptor()).unwrap();

    assert_eq!(
        value,
        NativeValue::record([("name", NativeValue::Str("Ada".into()))])
    );
}

#[test]
fn from_generic___current_version___skips_migration() {
    let input = gmap(&[
        ("version", GenericValue::UInt(2)),
        ("name", GenericValue::Str("Ada".into())),
    ]);

    let value = from_generic(&input, &versioned_descriptor()).unwrap();

    assert_eq!(
        value,
        NativeValue::record([("name", NativeValue::Str("Ada".into()))])
    );
}

#[test]
fn from_generic___missing_version___treated_as_legacy() {
    let input = gmap(&[("fullName", GenericValue::Str("Ada".into()))]);

    let value = from_generic(&input, &versioned_descriptor()).unwrap();

    assert_eq!(
        value,
        NativeValue::record([("name", NativeValue::Str("Ada".into()))])
    );
}

fn stamped_descriptor() -> TypeDescriptor {
    TypeDescriptor::record(
        "Note",
        vec![
            FieldSpec::new("body", TypeDescriptor::string()),
            FieldSpec::new("created_at", TypeDescriptor::timestamp()),
            FieldSpec::new("updated_at", TypeDescriptor::timestamp()),
        ],
    )
}

fn epoch_text() -> GenericValue {
    GenericValue::Str("1970-01-01T00:00:00Z".into())
}

#[test]
fn to_generic___updated_at___stamped_on_every_conversion() {
    let value = NativeValue::record([("body", NativeValue::Str("hi".into()))]);

    let generic = to_generic(&value, &stamped_descriptor(), false).unwrap();

    assert_ne!(generic.get("updatedAt"), Some(&epoch_text()));
}

#[test]
fn to_generic___created_at___untouched_unless_create() {
    let value = NativeValue::record([("body", NativeValue::Str("hi".into()))]);

    let updated = to_generic(&value, &stamped_descriptor(), false).unwrap();
    let created = to_generic(&value, &stamped_descriptor(), true).unwrap();

    assert_eq!(updated.get("createdAt"), Some(&epoch_text()));
    assert_ne!(created.get("createdAt"), Some(&epoch_text()));
}

#[test]
fn from_generic___unknown_field___is_rejected() {
    let input = gmap(&[
        ("a", GenericValue::Str("x".into())),
        ("c", GenericValue::Str("y".into())),
    ]);

    let err = from_generic(&input, &pair_descriptor()).unwrap_err();

    assert!(matches!(err.root(), StructuralError::UnknownField(name) if name == "c"));
}

#[test]
fn from_generic___missing_required_field___is_rejected() {
    let input = gmap(&[("c", GenericValue::Str("y".into()))]);

    let err = from_generic(&input, &pair_descriptor()).unwrap_err();

    assert!(matches!(err.root(), StructuralError::MissingField(name) if name == "a"));
}

#[test]
fn from_generic___absent_optional_field___lands_at_zero() {
    let input = gmap(&[("a", GenericValue::Str("x".into()))]);

    let value = from_generic(&input, &pair_descriptor()).unwrap();

    assert_eq!(
        value,
        NativeValue::record([
            ("a", NativeValue::Str("x".into())),
            ("b", NativeValue::Null)
        ])
    );
}

#[test]
fn from_generic___null_collections___become_empty() {
    let seq = from_generic(
        &GenericValue::Null,
        &TypeDescriptor::seq(TypeDescriptor::string()),
    )
    .unwrap();
    let map = from_generic(
        &GenericValue::Null,
        &TypeDescriptor::map(TypeDescriptor::string()),
    )
    .unwrap();

    assert_eq!(seq, NativeValue::Seq(vec![]));
    assert_eq!(map, NativeValue::Map(IndexMap::new()));
}

#[test]
fn from_generic___fixed_seq_short___is_rejected() {
    let descriptor = TypeDescriptor::fixed_seq(TypeDescriptor::int64(), 4);
    let input = GenericValue::List(vec![
        GenericValue::Int(1),
        GenericValue::Int(2),
        GenericValue::Int(3),
    ]);

    let err = from_generic(&input, &descriptor).unwrap_err();

    assert!(matches!(err.root(), StructuralError::TypeMismatch { .. }));
}

#[test]
fn from_generic___fixed_seq_exact___succeeds() {
    let descriptor = TypeDescriptor::fixed_seq(TypeDescriptor::int64(), 4);
    let input = GenericValue::List(vec![
        GenericValue::Int(1),
        GenericValue::Int(2),
        GenericValue::Int(3),
        GenericValue::Int(4),
    ]);

    let value = from_generic(&input, &descriptor).unwrap();

    assert_eq!(
        value,
        NativeValue::Seq(vec![
            NativeValue::I64(1),
            NativeValue::I64(2),
            NativeValue::I64(3),
            NativeValue::I64(4)
        ])
    );
}

#[test]
fn from_generic___enum_member___is_accepted() {
    let descriptor = TypeDescriptor::enumeration("Grade", ["A", "B"]);

    let value = from_generic(&GenericValue::Str("A".into()), &descriptor).unwrap();

    assert_eq!(value, NativeValue::Str("A".into()));
}

#[test]
fn from_generic___enum_non_member___is_rejected() {
    let descriptor = TypeDescriptor::enumeration("Grade", ["A", "B"]);

    let err = from_generic(&GenericValue::Str("C".into()), &descriptor).unwrap_err();

    assert!(matches!(err.root(), StructuralError::InvalidEnum(value) if value == "C"));
}

#[test]
fn from_generic___optional_null___is_absent() {
    let descriptor = TypeDescriptor::optional(TypeDescriptor::string());

    let value = from_generic(&GenericValue::Null, &descriptor).unwrap();

    assert_eq!(value, NativeValue::Null);
}

#[test]
fn from_generic___dynamic___stores_input_verbatim() {
    let input = gmap(&[("anything", GenericValue::List(vec![GenericValue::Int(1)]))]);

    let value = from_generic(&input, &TypeDescriptor::dynamic()).unwrap();

    let NativeValue::Map(map) = value else {
        panic!("expected map");
    };
    assert_eq!(
        map.get("anything"),
        Some(&NativeValue::Seq(vec![NativeValue::I64(1)]))
    );
}

#[test]
fn from_generic___dynamic_null___is_zero_value() {
    let value = from_generic(&GenericValue::Null, &TypeDescriptor::dynamic()).unwrap();

    assert_eq!(value, NativeValue::Null);
}

#[test]
fn from_generic___bytes___accepts_base64_text() {
    let value = from_generic(&GenericValue::Str("3q2+7w==".into()), &TypeDescriptor::bytes());

    assert_eq!(value.unwrap(), NativeValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]));
}

#[test]
fn from_generic___timestamp___parses_rfc3339() {
    let value = from_generic(
        &GenericValue::Str("2024-05-20T10:30:00Z".into()),
        &TypeDescriptor::timestamp(),
    )
    .unwrap();

    let expected = Utc.with_ymd_and_hms(2024, 5, 20, 10, 30, 0).unwrap();
    assert_eq!(value, NativeValue::Timestamp(expected));
}

#[test]
fn from_generic___nested_error___carries_full_path() {
    let descriptor = TypeDescriptor::record(
        "Order",
        vec![FieldSpec::new(
            "lines",
            TypeDescriptor::seq(TypeDescriptor::record(
                "Line",
                vec![FieldSpec::new("qty", TypeDescriptor::int64())],
            )),
        )],
    );
    let input = gmap(&[(
        "lines",
        GenericValue::List(vec![
            gmap(&[("qty", GenericValue::Int(1))]),
            gmap(&[("qty", GenericValue::Bool(true))]),
        ]),
    )]);

    let err = from_generic(&input, &descriptor).unwrap_err();

    assert_eq!(err.path(), Some("lines[1].qty"));
}

#[test]
fn from_generic___omitted_field_in_input___is_unknown() {
    let descriptor = TypeDescriptor::record(
        "Account",
        vec![
            FieldSpec::new("name", TypeDescriptor::string()),
            FieldSpec::new("password_hash", TypeDescriptor::string()).omitted(),
        ],
    );
    let input = gmap(&[
        ("name", GenericValue::Str("ada".into())),
        ("passwordHash", GenericValue::Str("secret".into())),
    ]);

    let err = from_generic(&input, &descriptor).unwrap_err();

    assert!(matches!(err.root(), StructuralError::UnknownField(name) if name == "passwordHash"));
}

#[test]
fn roundtrip___record_with_absent_optional___follows_lossy_null_law() {
    let descriptor = TypeDescriptor::record(
        "Mixed",
        vec![
            FieldSpec::new("name", TypeDescriptor::string()),
            FieldSpec::new("tags", TypeDescriptor::seq(TypeDescriptor::string())),
            FieldSpec::new("nickname", TypeDescriptor::optional(TypeDescriptor::string()))
                .optional(),
        ],
    );
    let value = NativeValue::record([
        ("name", NativeValue::Str("Ada".into())),
        ("tags", NativeValue::Seq(vec![])),
        ("nickname", NativeValue::Null),
    ]);

    let generic = to_generic(&value, &descriptor, false).unwrap();
    let back = from_generic(&generic, &descriptor).unwrap();

    assert_eq!(back, value);
}
