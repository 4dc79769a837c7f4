use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::errors::PrepareError;
use crate::model::DocumentRecord;

/// Fixed manifest filename, one per batch directory.
pub const MANIFEST_FILENAME: &str = "manifest.yaml";

/// Batch manifest: document identifier -> record, serialized in insertion
/// order. Never merged across batches.
pub type Manifest = IndexMap<String, DocumentRecord>;

/// Writes `manifest` as block-style YAML to `<directory_path>/manifest.yaml`.
///
/// The content is staged in a temp file in the same directory and moved into
/// place, so a failed serialization or write never leaves a partial manifest
/// behind.
pub fn write_manifest<T: Serialize>(
    manifest: &T,
    directory_path: &Path,
) -> Result<(), PrepareError> {
    let manifest_path = directory_path.join(MANIFEST_FILENAME);
    let write_err = |source: Box<dyn std::error::Error + Send + Sync>| PrepareError::ManifestWrite {
        path: manifest_path.clone(),
        source,
    };

    let data = serde_yaml::to_string(manifest).map_err(|err| write_err(err.into()))?;

    let mut staged = NamedTempFile::new_in(directory_path).map_err(|err| write_err(err.into()))?;
    staged
        .write_all(data.as_bytes())
        .map_err(|err| write_err(err.into()))?;
    staged
        .persist(&manifest_path)
        .map_err(|err| write_err(err.into()))?;

    Ok(())
}
