use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::{info, warn};

use crate::cli::{ParserKind, PrepareArgs};
use crate::manifest::{Manifest, write_manifest};
use crate::parsers;
use crate::reconcile::{BASE_FILENAME, Reconciler};

// Batch directories are date-stamped (20150331); document directories carry
// the downloader's fixed-width hex identifier (090004d2805baaa4).
const BATCH_DIR_PATTERN: &str = r"^\d{8}$";
const DOCUMENT_DIR_PATTERN: &str = r"^[0-9a-f]{16}$";

pub fn run(args: PrepareArgs) -> Result<()> {
    info!(
        agency = %args.agency_directory.display(),
        parser = args.parser.as_str(),
        dry_run = args.dry_run,
        "preparing agency documents"
    );

    let reconciler = reconciler_for(args.parser);
    prepare_documents(&reconciler, &args.agency_directory, args.dry_run)
}

pub fn reconciler_for(kind: ParserKind) -> Reconciler {
    match kind {
        ParserKind::None => Reconciler::new(),
        ParserKind::Foiaonline => Reconciler::with_custom_parser(parsers::foiaonline_parser()),
    }
}

/// Walks every date-stamped batch under the agency root, reconciles each
/// document, and writes one `manifest.yaml` per batch.
///
/// A document whose metadata cannot be reconciled is logged and omitted; the
/// rest of the batch still makes it into the manifest. Only agency-level
/// traversal failures abort the run.
pub fn prepare_documents(
    reconciler: &Reconciler,
    agency_directory: &Path,
    dry_run: bool,
) -> Result<()> {
    let batch_pattern =
        Regex::new(BATCH_DIR_PATTERN).context("failed to compile batch directory regex")?;
    let document_pattern =
        Regex::new(DOCUMENT_DIR_PATTERN).context("failed to compile document directory regex")?;

    let batches = matching_subdirectories(agency_directory, &batch_pattern)?;
    if batches.is_empty() {
        bail!("no batch directories found in {}", agency_directory.display());
    }

    for (batch_name, batch_path) in batches {
        let documents = matching_subdirectories(&batch_path, &document_pattern)?;
        if documents.is_empty() {
            warn!(batch = %batch_path.display(), "no document directories, skipping batch");
            continue;
        }

        let mut manifest = Manifest::new();
        let mut skipped = 0_usize;

        for (document_id, document_path) in documents {
            match reconciler.prep_metadata(&document_path, BASE_FILENAME) {
                Ok(record) => {
                    manifest.insert(document_id, record);
                }
                Err(err) => {
                    skipped += 1;
                    warn!(
                        document = %document_path.display(),
                        error = %err,
                        "skipping document"
                    );
                }
            }
        }

        if dry_run {
            info!(
                batch = batch_name.as_str(),
                documents = manifest.len(),
                skipped,
                "dry-run complete, manifest not written"
            );
            continue;
        }

        write_manifest(&manifest, &batch_path)?;
        info!(
            batch = batch_name.as_str(),
            documents = manifest.len(),
            skipped,
            "wrote batch manifest"
        );
    }

    Ok(())
}

fn matching_subdirectories(parent: &Path, pattern: &Regex) -> Result<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();

    let entries =
        fs::read_dir(parent).with_context(|| format!("failed to read {}", parent.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", parent.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_dir()
        {
            continue;
        }

        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };

        if pattern.is_match(name) {
            dirs.push((name.to_owned(), path));
        }
    }

    dirs.sort();

    Ok(dirs)
}
