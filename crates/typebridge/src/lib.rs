//! typebridge - Structural value/schema engine
//!
//! This crate provides the pure transformations shared by every
//! boundary-crossing subsystem built on it:
//! - [`GenericValue`]: the JSON-like dynamic value representation
//! - [`to_generic`] / [`from_generic`]: bidirectional structural conversion
//!   driven by a [`TypeDescriptor`]
//! - [`derive_schema`]: schema-document derivation from a descriptor
//! - [`SchemaNode`]: the schema document model with its two universal
//!   sentinels
//! - [`Structural`]: hand-written registration of native types
//!
//! Every operation is a synchronous, side-effect-free tree walk over
//! caller-owned inputs; the engine holds no state across calls and is safe
//! to use from any number of threads without synchronization.

mod convert;
mod derive;
mod descriptor;
mod docs;
mod error;
mod native;
mod schema;
mod structural;
mod value;

pub use convert::{from_generic, to_generic};
pub use derive::derive_schema;
pub use descriptor::{
    FieldSpec, FloatWidth, IntWidth, Kind, RecordSpec, RecordVersioning, TypeDescriptor,
    lower_camel_case,
};
pub use docs::{DescriptionSource, NoDocs, StaticDocs};
pub use error::{StructuralError, StructuralResult};
pub use native::NativeValue;
pub use schema::{SchemaDoc, SchemaNode, SchemaType};
pub use structural::{Structural, decode, encode, schema_of};
pub use value::GenericValue;

/// Maximum type-graph nesting either tree walk will follow.
///
/// Type graphs are expected to be acyclic; recursion past this depth fails
/// with an unsupported-shape error instead of overflowing the stack.
pub const MAX_NESTING: usize = 128;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DescriptionSource, FieldSpec, GenericValue, Kind, NativeValue, NoDocs, SchemaDoc,
        SchemaNode, SchemaType, StaticDocs, Structural, StructuralError, StructuralResult,
        TypeDescriptor, decode, derive_schema, encode, from_generic, schema_of, to_generic,
    };
}
