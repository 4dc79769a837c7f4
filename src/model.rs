use serde::{Deserialize, Serialize};

/// One manifest entry. Field order here is the order fields appear in the
/// written manifest. Every field is optional; a missing sidecar key leaves
/// the matching field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub file_type: Option<String>,
    pub date_created: Option<String>,
    pub date_released: Option<String>,
    pub pages: Option<String>,
    pub title: Option<String>,
    pub doc_location: Option<String>,
}

impl DocumentRecord {
    /// Fills unset fields from `other`, one field at a time. A field that
    /// already holds a value is never overwritten, so merge precedence is
    /// simply the order in which sources are folded in.
    ///
    /// `doc_location` is deliberately excluded: it is derived from the
    /// document's storage layout after merging, so sources have no say in it.
    pub fn fill_missing_from(&mut self, other: &DocumentRecord) {
        fill(&mut self.file_type, &other.file_type);
        fill(&mut self.date_created, &other.date_created);
        fill(&mut self.date_released, &other.date_released);
        fill(&mut self.pages, &other.pages);
        fill(&mut self.title, &other.title);
    }
}

fn fill(slot: &mut Option<String>, candidate: &Option<String>) {
    if slot.is_none() {
        slot.clone_from(candidate);
    }
}

/// Raw extraction-tool sidecar (`record_metadata.json`). Key names are the
/// Tika conventions used by the download pipeline; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionMetadata {
    #[serde(rename = "Content-Type", default)]
    pub content_type: Option<String>,

    #[serde(rename = "Creation-Date", default)]
    pub creation_date: Option<String>,

    /// Release timestamp, despite the "created" key name.
    #[serde(rename = "dcterms:created", default)]
    pub released: Option<String>,

    #[serde(rename = "xmpTPg:NPages", default)]
    pub pages: Option<String>,

    #[serde(default)]
    pub title: Option<String>,
}
