//! Code generation from schema documents.
//!
//! Schema documents are the language-neutral middle of the pipeline: the
//! engine derives them from type descriptors, and the generators here render
//! them into target-language type declarations.
//!
//! ```text
//! TypeDescriptor
//!     ↓
//!  [typebridge::derive_schema]
//!     ↓
//!  SchemaNode document
//!     ↓
//!  [TypeScript generator] → *.d.ts
//! ```
//!
//! Keeping the schema document as the interchange point means new target
//! languages only need a renderer, not their own derivation pass.

pub mod typescript;
