//! Hand-written type registration
//!
//! [`Structural`] is the crate's stand-in for a structural-introspection
//! facility: a type declares its [`TypeDescriptor`] once and provides the
//! two lifts between itself and [`NativeValue`]. The engine places no
//! constraint on how the metadata is produced, only on its shape.
//!
//! ```ignore
//! struct Greeting {
//!     message: String,
//! }
//!
//! impl Structural for Greeting {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::record(
//!             "Greeting",
//!             vec![FieldSpec::new("message", TypeDescriptor::string())],
//!         )
//!     }
//!
//!     fn to_native(&self) -> NativeValue {
//!         NativeValue::record([("message", NativeValue::Str(self.message.clone()))])
//!     }
//!
//!     fn from_native(value: NativeValue) -> StructuralResult<Self> {
//!         let NativeValue::Record(mut fields) = value else {
//!             return Err(StructuralError::mismatch("record", value.kind_name()));
//!         };
//!         match fields.shift_remove("message") {
//!             Some(NativeValue::Str(message)) => Ok(Greeting { message }),
//!             other => Err(StructuralError::mismatch("string", "missing field")),
//!         }
//!     }
//! }
//! ```

use crate::convert::{from_generic, to_generic};
use crate::derive::derive_schema;
use crate::descriptor::TypeDescriptor;
use crate::docs::DescriptionSource;
use crate::error::StructuralResult;
use crate::native::NativeValue;
use crate::schema::SchemaNode;
use crate::value::GenericValue;

/// A type registered with the engine
pub trait Structural {
    /// The read-only structural description of this type
    fn descriptor() -> TypeDescriptor;

    /// Lift a value into the engine's concrete union
    fn to_native(&self) -> NativeValue;

    /// Rebuild a value from the engine's concrete union
    fn from_native(value: NativeValue) -> StructuralResult<Self>
    where
        Self: Sized;
}

/// Convert a registered value into its generic representation
pub fn encode<T: Structural>(value: &T, is_create: bool) -> StructuralResult<GenericValue> {
    to_generic(&value.to_native(), &T::descriptor(), is_create)
}

/// Rebuild a registered value from its generic representation
pub fn decode<T: Structural>(generic: &GenericValue) -> StructuralResult<T> {
    T::from_native(from_generic(generic, &T::descriptor())?)
}

/// Derive the schema document of a registered type
pub fn schema_of<T: Structural>(docs: &dyn DescriptionSource) -> StructuralResult<SchemaNode> {
    derive_schema(&T::descriptor(), docs)
}
