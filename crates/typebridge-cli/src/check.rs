//! Validate a schema document file.

use crate::generate;
use anyhow::Result;
use std::path::Path;

/// Parse the document and render every declaration, discarding the output.
pub fn run(input: &str) -> Result<()> {
    let document = generate::load_document(Path::new(input))?;
    generate::render_document(&document, "export")?;

    tracing::info!(schemas = document.len(), input, "schema document OK");
    Ok(())
}
