//! Serialization of the extracted endpoints document to JSON or YAML.

use crate::document_builder::EndpointsDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes an endpoints document to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(doc: &EndpointsDocument) -> Result<String> {
    debug!("Serializing endpoints document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize endpoints document to JSON")
}

/// Serializes an endpoints document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(doc: &EndpointsDocument) -> Result<String> {
    debug!("Serializing endpoints document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize endpoints document to YAML")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!(
        "Successfully wrote {} bytes to {}",
        content.len(),
        path.display()
    );
    Ok(())
}
