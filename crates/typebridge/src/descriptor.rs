//! Type descriptors and per-field serialization metadata
//!
//! A [`TypeDescriptor`] is a read-only structural description of a type,
//! classified into exactly one [`Kind`]. Descriptors are built once per type
//! outside the engine (by hand-written registration or an introspection
//! frontend) and are immutable for the engine's purposes. Record kinds carry
//! an ordered list of [`FieldSpec`]; declaration order is semantically
//! significant and drives schema property and required-list order.

use crate::error::StructuralResult;
use crate::value::GenericValue;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Read-only structural description of a type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Declared name, used for schema titles and description lookups.
    /// Anonymous shapes (scalars, containers) usually carry no name.
    pub name: Option<String>,
    /// The structural classification
    pub kind: Kind,
}

/// Integer bit widths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

/// Float bit widths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    W32,
    W64,
}

/// Structural classification of a type
///
/// Every descriptor resolves to exactly one kind. `Opaque` stands in for a
/// host shape the engine cannot destructure (a function, a channel); any
/// conversion or derivation touching it fails with an unsupported-shape
/// error rather than being silently skipped.
#[derive(Debug, Clone)]
pub enum Kind {
    Bool,
    Int(IntWidth),
    UInt(IntWidth),
    Float(FloatWidth),
    Str,
    /// Opaque byte string; converted as a unit, never iterated
    Bytes,
    /// Fixed-length sequence: element type and exact length
    FixedSeq(Box<TypeDescriptor>, usize),
    /// Variable-length sequence
    Seq(Box<TypeDescriptor>),
    /// String-keyed map
    Map(Box<TypeDescriptor>),
    /// Pointer/nullable wrapper
    Optional(Box<TypeDescriptor>),
    /// Unconstrained "any" slot; converted by inspecting the runtime value
    Dynamic,
    /// Named record with ordered fields
    Record(RecordSpec),
    /// Wall-clock instant; RFC 3339 text in the generic form
    Timestamp,
    /// String type with a closed set of valid member values
    Enum(Vec<String>),
    /// A host shape the engine cannot destructure
    Opaque(String),
}

impl Kind {
    /// Short label for this kind, used in error messages
    pub fn label(&self) -> String {
        match self {
            Kind::Bool => "bool".into(),
            Kind::Int(w) => format!("int{}", w.bits()),
            Kind::UInt(w) => format!("uint{}", w.bits()),
            Kind::Float(w) => format!("float{}", w.bits()),
            Kind::Str => "string".into(),
            Kind::Bytes => "bytes".into(),
            Kind::FixedSeq(_, len) => format!("array[{len}]"),
            Kind::Seq(_) => "array".into(),
            Kind::Map(_) => "object".into(),
            Kind::Optional(inner) => format!("optional {}", inner.kind.label()),
            Kind::Dynamic => "any".into(),
            Kind::Record(_) => "record".into(),
            Kind::Timestamp => "timestamp".into(),
            Kind::Enum(_) => "enum".into(),
            Kind::Opaque(name) => name.clone(),
        }
    }
}

impl IntWidth {
    /// Width in bits
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }
}

impl FloatWidth {
    /// Width in bits
    pub fn bits(self) -> u32 {
        match self {
            FloatWidth::W32 => 32,
            FloatWidth::W64 => 64,
        }
    }
}

/// Ordered field list plus optional capabilities of a record type
#[derive(Clone)]
pub struct RecordSpec {
    /// Fields in declaration order
    pub fields: Vec<FieldSpec>,
    /// Version/migration capability, attached at registration time
    pub versioning: Option<Arc<dyn RecordVersioning>>,
}

impl fmt::Debug for RecordSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSpec")
            .field("fields", &self.fields)
            .field("versioned", &self.versioning.is_some())
            .finish()
    }
}

/// Version/migration capability a record type may implement
///
/// Checked once per record conversion, never inside the recursive hot path.
/// On write, the converter stamps a `version` entry with
/// [`RecordVersioning::current_version`]. On read, a generic map carrying an
/// older version is handed to [`RecordVersioning::migrate`] to be rewritten
/// into the current shape before field decoding.
pub trait RecordVersioning: Send + Sync {
    /// The version stamped into every written generic map
    fn current_version(&self) -> u64;

    /// Rewrite a legacy-shaped map (read at `found`) into the current shape
    fn migrate(
        &self,
        found: u64,
        map: &mut IndexMap<String, GenericValue>,
    ) -> StructuralResult<()>;
}

/// Per-field serialization metadata of a record type
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Declared (source) field name
    pub name: String,
    /// Serialized-name override; defaults to the lower-camel-cased declared name
    pub rename: Option<String>,
    /// Field may be absent on read and is omitted on write when zero-valued
    pub optional: bool,
    /// Field is never serialized
    pub omit: bool,
    /// The field's own type
    pub ty: TypeDescriptor,
}

impl FieldSpec {
    /// Create a field with default serialization directives
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            rename: None,
            optional: false,
            omit: false,
            ty,
        }
    }

    /// Override the serialized name
    pub fn renamed(mut self, wire: impl Into<String>) -> Self {
        self.rename = Some(wire.into());
        self
    }

    /// Mark the field optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Exclude the field from serialization entirely
    pub fn omitted(mut self) -> Self {
        self.omit = true;
        self
    }

    /// The name this field serializes under
    pub fn wire_name(&self) -> String {
        match &self.rename {
            Some(wire) => wire.clone(),
            None => lower_camel_case(&self.name),
        }
    }
}

impl TypeDescriptor {
    fn anonymous(kind: Kind) -> Self {
        Self { name: None, kind }
    }

    /// Attach a declared name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn boolean() -> Self {
        Self::anonymous(Kind::Bool)
    }

    pub fn int32() -> Self {
        Self::anonymous(Kind::Int(IntWidth::W32))
    }

    pub fn int64() -> Self {
        Self::anonymous(Kind::Int(IntWidth::W64))
    }

    pub fn uint32() -> Self {
        Self::anonymous(Kind::UInt(IntWidth::W32))
    }

    pub fn uint64() -> Self {
        Self::anonymous(Kind::UInt(IntWidth::W64))
    }

    pub fn float32() -> Self {
        Self::anonymous(Kind::Float(FloatWidth::W32))
    }

    pub fn float64() -> Self {
        Self::anonymous(Kind::Float(FloatWidth::W64))
    }

    pub fn string() -> Self {
        Self::anonymous(Kind::Str)
    }

    pub fn bytes() -> Self {
        Self::anonymous(Kind::Bytes)
    }

    pub fn timestamp() -> Self {
        Self::anonymous(Kind::Timestamp)
    }

    pub fn dynamic() -> Self {
        Self::anonymous(Kind::Dynamic)
    }

    pub fn fixed_seq(elem: TypeDescriptor, len: usize) -> Self {
        Self::anonymous(Kind::FixedSeq(Box::new(elem), len))
    }

    pub fn seq(elem: TypeDescriptor) -> Self {
        Self::anonymous(Kind::Seq(Box::new(elem)))
    }

    pub fn map(elem: TypeDescriptor) -> Self {
        Self::anonymous(Kind::Map(Box::new(elem)))
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::anonymous(Kind::Optional(Box::new(inner)))
    }

    /// A named record with ordered fields and no capabilities
    pub fn record(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Kind::Record(RecordSpec {
                fields,
                versioning: None,
            }),
        }
    }

    /// A named record carrying a version/migration capability
    pub fn versioned_record(
        name: impl Into<String>,
        fields: Vec<FieldSpec>,
        versioning: Arc<dyn RecordVersioning>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            kind: Kind::Record(RecordSpec {
                fields,
                versioning: Some(versioning),
            }),
        }
    }

    /// A named string type with a closed member set
    pub fn enumeration<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.into()),
            kind: Kind::Enum(members.into_iter().map(Into::into).collect()),
        }
    }

    /// A host shape the engine cannot destructure
    pub fn opaque(type_name: impl Into<String>) -> Self {
        Self::anonymous(Kind::Opaque(type_name.into()))
    }
}

/// Convert a `snake_case` declared name to its default `camelCase` wire form.
///
/// The first word stays as declared; every following word is capitalized.
/// Consecutive and leading/trailing underscores collapse.
pub fn lower_camel_case(name: &str) -> String {
    let mut words = name.split('_').filter(|word| !word.is_empty());
    let mut out = String::with_capacity(name.len());
    if let Some(first) = words.next() {
        out.push_str(first);
    }
    for word in words {
        let mut chars = word.chars();
        if let Some(head) = chars.next() {
            out.extend(head.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
