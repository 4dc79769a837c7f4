use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by metadata reconciliation and manifest writing.
///
/// Per-field normalization failures on optional fields are logged and
/// recovered locally; everything here aborts at most one document's
/// contribution to a batch, never the batch itself.
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("malformed timestamp: {raw:?}")]
    MalformedTimestamp { raw: String },

    #[error("metadata sidecar missing: {path}")]
    MetadataSourceMissing { path: PathBuf },

    #[error("failed to read metadata sidecar: {path}")]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse metadata sidecar: {path}")]
    MetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("custom parser failed on {path}")]
    CustomParser {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to write manifest: {path}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
