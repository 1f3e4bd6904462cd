//! Reading and writing the gallery file.
//!
//! The document is always read and rewritten whole.  Writes go to a sibling
//! temp file that is then renamed over the target, so a failed write never
//! leaves a truncated gallery behind.

use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::model::Document;
use crate::error::{GalleryError, Result};

/// Load the document at `path`.
///
/// A missing file or malformed JSON yields an empty grouped document (the
/// latter with a warning); any other I/O failure is returned.
pub fn read(path: &Path) -> Result<Document> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("{} does not exist yet, starting empty", path.display());
            return Ok(Document::default());
        }
        Err(e) => return Err(GalleryError::io(path, e)),
    };
    match serde_json::from_str(&contents) {
        Ok(doc) => Ok(doc),
        Err(e) => {
            tracing::warn!("Error reading gallery file {}: {e}", path.display());
            Ok(Document::default())
        }
    }
}

/// Pretty-print `doc` (2-space indent) and atomically replace `path`.
pub fn write(path: &Path, doc: &Document) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| GalleryError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| GalleryError::io(dir, e))?;
    let tmp_path = tmp.path().to_path_buf();
    tmp.write_all(json.as_bytes())
        .map_err(|e| GalleryError::io(&tmp_path, e))?;
    tmp.persist(path)
        .map_err(|e| GalleryError::io(path, e.error))?;

    tracing::debug!("wrote {} items to {}", doc.item_count(), path.display());
    Ok(())
}
