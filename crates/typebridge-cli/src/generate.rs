//! Generate TypeScript declarations from a schema document file.

use crate::codegen::typescript;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use typebridge::SchemaNode;

/// Read a schema document, render every declaration, write the output file.
pub fn run(input: &str, output: &str, prefix: &str) -> Result<()> {
    let document = load_document(Path::new(input))?;
    let rendered = render_document(&document, prefix)?;

    fs::write(output, rendered).with_context(|| format!("Failed to write {output:?}"))?;

    tracing::info!(
        declarations = document.len(),
        output,
        "generated TypeScript declarations"
    );
    Ok(())
}

/// Load a JSON schema document: an object of type name -> schema, in
/// declaration order. Sentinel schemas (`true` / `false`) are valid entries.
pub fn load_document(path: &Path) -> Result<IndexMap<String, SchemaNode>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse schema document {path:?}"))
}

/// Render one declaration per document entry, in document order.
pub fn render_document(
    document: &IndexMap<String, SchemaNode>,
    prefix: &str,
) -> Result<String> {
    let mut declarations = Vec::with_capacity(document.len());
    for (name, schema) in document {
        let declaration =
            typescript::render_declaration(schema, &format!("{prefix} type {name} = "))
                .with_context(|| format!("Failed to render declaration for `{name}`"))?;
        declarations.push(declaration);
    }
    Ok(format!("{}\n", declarations.join("\n\n")))
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
