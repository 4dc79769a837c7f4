use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::warn;

use crate::errors::PrepareError;
use crate::model::{DocumentRecord, ExtractionMetadata};
use crate::normalize::{clean_file_type, parse_date};

/// Fixed sidecar filename written by the download pipeline next to each
/// document payload.
pub const SIDECAR_FILENAME: &str = "record_metadata.json";

/// Fixed base name of the document payload (`record.<ext>`).
pub const BASE_FILENAME: &str = "record";

pub type CustomParserError = Box<dyn std::error::Error + Send + Sync>;

/// Agency-specific metadata parser. Receives the sidecar path and the
/// in-progress record, returns a patch in the same field vocabulary. `None`
/// fields mean "no opinion", never "clear the existing value".
pub type CustomParser =
    Box<dyn Fn(&Path, &DocumentRecord) -> Result<DocumentRecord, CustomParserError>>;

/// Merges extraction-tool sidecar metadata with an optional agency-specific
/// parser into a single [`DocumentRecord`] per document.
///
/// The parser slot lives on the instance so that batches for different
/// agencies can run with different parsers without cross-contamination.
#[derive(Default)]
pub struct Reconciler {
    custom_parser: Option<CustomParser>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_parser(parser: CustomParser) -> Self {
        Self {
            custom_parser: Some(parser),
        }
    }

    /// Builds the manifest record for the document rooted at `root`.
    ///
    /// Merge order is fixed: custom parser output first (when configured),
    /// then normalized sidecar metadata fills the remaining gaps. A field,
    /// once set, is never overwritten by a later source. `doc_location` is
    /// derived, so it is recomputed unconditionally at the end.
    pub fn prep_metadata(
        &self,
        root: &Path,
        base_file: &str,
    ) -> Result<DocumentRecord, PrepareError> {
        let mut record = DocumentRecord::default();
        let metadata_file = root.join(SIDECAR_FILENAME);

        if let Some(parser) = &self.custom_parser {
            let patch =
                parser(&metadata_file, &record).map_err(|source| PrepareError::CustomParser {
                    path: metadata_file.clone(),
                    source,
                })?;
            record.fill_missing_from(&patch);
        }

        match load_sidecar(&metadata_file) {
            Ok(metadata) => {
                record.fill_missing_from(&normalize_extraction(&metadata, &metadata_file));
            }
            Err(PrepareError::MetadataSourceMissing { .. }) if self.custom_parser.is_some() => {
                warn!(
                    path = %metadata_file.display(),
                    "sidecar missing, proceeding with custom parser output only"
                );
            }
            Err(err) => return Err(err),
        }

        prepare_file_location(&mut record, root, base_file);

        Ok(record)
    }
}

/// Computes the storage location of the document payload relative to the
/// batch root: `<document_dir>/<base_file>.<ext>`, where the extension is the
/// normalized file type.
pub fn prepare_file_location(record: &mut DocumentRecord, root: &Path, base_file: &str) {
    // Derived, never sourced: any value a merge source smuggled in is stale.
    record.doc_location = None;

    let Some(file_type) = record.file_type.as_deref() else {
        warn!(
            root = %root.display(),
            "file type unresolved, leaving doc_location unset"
        );
        return;
    };

    let Some(document_dir) = root.file_name().and_then(|name| name.to_str()) else {
        warn!(
            root = %root.display(),
            "document directory name is not valid UTF-8, leaving doc_location unset"
        );
        return;
    };

    record.doc_location = Some(format!("{document_dir}/{base_file}.{file_type}"));
}

fn load_sidecar(path: &Path) -> Result<ExtractionMetadata, PrepareError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(PrepareError::MetadataSourceMissing {
                path: path.to_owned(),
            });
        }
        Err(err) => {
            return Err(PrepareError::MetadataRead {
                path: path.to_owned(),
                source: err,
            });
        }
    };

    serde_json::from_slice(&raw).map_err(|source| PrepareError::MetadataParse {
        path: path.to_owned(),
        source,
    })
}

fn normalize_extraction(metadata: &ExtractionMetadata, path: &Path) -> DocumentRecord {
    DocumentRecord {
        file_type: metadata.content_type.as_deref().map(clean_file_type),
        date_created: normalize_date(metadata.creation_date.as_deref(), "Creation-Date", path),
        date_released: normalize_date(metadata.released.as_deref(), "dcterms:created", path),
        pages: metadata.pages.clone(),
        title: metadata.title.clone(),
        doc_location: None,
    }
}

// A bad timestamp costs one optional field, not the whole document.
fn normalize_date(raw: Option<&str>, field: &'static str, path: &Path) -> Option<String> {
    let raw = raw?;
    match parse_date(raw) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(
                path = %path.display(),
                field,
                error = %err,
                "dropping unparseable timestamp"
            );
            None
        }
    }
}
