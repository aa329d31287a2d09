//! JSON listing of exported shapes.
//!
//! Records where each shape came from in the source sheet and where it was
//! written, so downstream tooling can map sprites back to the sheet.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, SplitError};
use crate::extract::Connectivity;

use super::ExportedShape;

/// Top-level manifest document.
#[derive(Debug, Serialize)]
pub struct ExportManifest<'a> {
    /// Source image the shapes were cut from.
    pub source: String,
    pub connectivity: Connectivity,
    pub shapes: &'a [ExportedShape],
}

/// Write the manifest as pretty-printed JSON.
pub fn write_manifest(manifest: &ExportManifest<'_>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest).map_err(|e| SplitError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to serialize manifest: {}", e),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SplitError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create manifest directory: {}", e),
        })?;
    }

    fs::write(path, json).map_err(|e| SplitError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write manifest: {}", e),
    })
}
