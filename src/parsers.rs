use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::DocumentRecord;
use crate::reconcile::{CustomParser, CustomParserError};

/// FOIAonline export schema. Dates are already plain calendar dates, so no
/// timestamp normalization is needed here.
#[derive(Debug, Deserialize)]
struct FoiaonlineMetadata {
    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    released_on: Option<String>,

    #[serde(default)]
    file_type: Option<String>,
}

/// Custom parser for agencies whose documents come from FOIAonline exports.
pub fn foiaonline(
    metadata_file: &Path,
    _record: &DocumentRecord,
) -> Result<DocumentRecord, CustomParserError> {
    let raw = fs::read(metadata_file)?;
    let metadata: FoiaonlineMetadata = serde_json::from_slice(&raw)?;

    Ok(DocumentRecord {
        title: non_empty(metadata.title),
        date_released: non_empty(metadata.released_on),
        file_type: non_empty(metadata.file_type).map(|ft| crate::normalize::clean_file_type(&ft)),
        ..DocumentRecord::default()
    })
}

pub fn foiaonline_parser() -> CustomParser {
    Box::new(foiaonline)
}

// Exports use "" where no value is known; treat that as no opinion.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn foiaonline_maps_export_fields_to_record_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("record_metadata.json");
        fs::write(
            &path,
            r#"{"title": "FY2006-12", "released_on": "2015-02-13", "file_type": "pdf"}"#,
        )
        .unwrap();

        let patch = foiaonline(&path, &DocumentRecord::default()).unwrap();

        assert_eq!(patch.title.as_deref(), Some("FY2006-12"));
        assert_eq!(patch.date_released.as_deref(), Some("2015-02-13"));
        assert_eq!(patch.file_type.as_deref(), Some("pdf"));
        assert!(patch.pages.is_none());
    }

    #[test]
    fn foiaonline_treats_empty_strings_as_no_opinion() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("record_metadata.json");
        fs::write(&path, r#"{"title": "", "file_type": ""}"#).unwrap();

        let patch = foiaonline(&path, &DocumentRecord::default()).unwrap();

        assert!(patch.title.is_none());
        assert!(patch.file_type.is_none());
        assert!(patch.date_released.is_none());
    }

    #[test]
    fn foiaonline_surfaces_read_failures() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        assert!(foiaonline(&path, &DocumentRecord::default()).is_err());
    }
}
