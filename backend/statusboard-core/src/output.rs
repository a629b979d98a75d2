// src/output.rs
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::AppError;

/// Writes a finished page, creating missing parent directories and replacing
/// any previous file.
pub fn write_document(path: &Path, html: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, html)?;
    info!("Wrote {} ({} bytes)", path.display(), html.len());
    Ok(())
}
