//! Description lookup consumed by schema derivation

use std::collections::HashMap;

/// Supplies human-readable description text, keyed by type path and
/// optionally a field name.
///
/// Implementations are built once at startup (typically from a comment or
/// IDL extractor) and are immutable thereafter; the deriver only reads.
pub trait DescriptionSource {
    /// Description for a type (`field` = `None`) or one of its fields
    fn describe(&self, type_path: &str, field: Option<&str>) -> Option<String>;
}

/// A lookup with no descriptions
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocs;

impl DescriptionSource for NoDocs {
    fn describe(&self, _type_path: &str, _field: Option<&str>) -> Option<String> {
        None
    }
}

/// An immutable in-memory description table
#[derive(Debug, Clone, Default)]
pub struct StaticDocs {
    entries: HashMap<String, String>,
}

impl StaticDocs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type-level description
    pub fn with_type(mut self, type_path: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(type_path.into(), text.into());
        self
    }

    /// Add a field-level description
    pub fn with_field(
        mut self,
        type_path: impl Into<String>,
        field: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.entries
            .insert(format!("{}.{}", type_path.into(), field.into()), text.into());
        self
    }
}

impl DescriptionSource for StaticDocs {
    fn describe(&self, type_path: &str, field: Option<&str>) -> Option<String> {
        let key = match field {
            Some(field) => format!("{type_path}.{field}"),
            None => type_path.to_string(),
        };
        self.entries.get(&key).cloned()
    }
}
