//! Error types for structural conversion and schema derivation

use thiserror::Error;

/// Result type alias for engine operations
pub type StructuralResult<T> = Result<T, StructuralError>;

/// Error type for structural conversion, schema derivation, and rendering
///
/// Every recursive call site wraps a child error with positional context
/// (field name, list index, map key) via [`StructuralError::at`], so a single
/// failure reports the full path from the root type to the offending leaf,
/// e.g. `user.addresses[2].street`.
#[derive(Error, Debug)]
pub enum StructuralError {
    /// A structural shape the engine cannot destructure or construct
    #[error("unsupported structural shape: {0}")]
    Unsupported(String),

    /// A required record field was absent from the input map
    #[error("missing required field: {0}")]
    MissingField(String),

    /// An input map key was not declared by the target record type
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A string value outside the enumerated member set
    #[error("invalid enum value: {0}")]
    InvalidEnum(String),

    /// Input value shape does not match the target kind
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    /// A schema document that no declaration form can represent
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A child error wrapped with the path to the failing position
    #[error("at {path}: {source}")]
    In {
        path: String,
        #[source]
        source: Box<StructuralError>,
    },
}

impl StructuralError {
    /// Create a type-mismatch error from expected/got labels
    pub fn mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        StructuralError::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Wrap this error with a path segment one level closer to the root.
    ///
    /// Segments accumulate into a single dotted path; index segments
    /// (produced by [`StructuralError::at_index`]) attach without a dot.
    pub fn at(self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        match self {
            StructuralError::In { path, source } => {
                let path = if path.starts_with('[') {
                    format!("{segment}{path}")
                } else {
                    format!("{segment}.{path}")
                };
                StructuralError::In { path, source }
            }
            other => StructuralError::In {
                path: segment,
                source: Box::new(other),
            },
        }
    }

    /// Wrap this error with a list index segment
    pub fn at_index(self, index: usize) -> Self {
        self.at(format!("[{index}]"))
    }

    /// The innermost error, with all path wrapping stripped
    pub fn root(&self) -> &StructuralError {
        match self {
            StructuralError::In { source, .. } => source.root(),
            other => other,
        }
    }

    /// The accumulated path, if any context has been attached
    pub fn path(&self) -> Option<&str> {
        match self {
            StructuralError::In { path, .. } => Some(path),
            _ => None,
        }
    }
}
