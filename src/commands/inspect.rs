use anyhow::{Context, Result};
use tracing::info;

use crate::cli::InspectArgs;
use crate::commands::prepare::reconciler_for;
use crate::reconcile::BASE_FILENAME;

/// Reconciles a single document directory and logs the resulting record
/// without touching any manifest. Useful for checking what a batch run would
/// record for one document.
pub fn run(args: InspectArgs) -> Result<()> {
    let reconciler = reconciler_for(args.parser);

    let record = reconciler
        .prep_metadata(&args.document_directory, BASE_FILENAME)
        .with_context(|| {
            format!(
                "failed to reconcile {}",
                args.document_directory.display()
            )
        })?;

    info!(
        path = %args.document_directory.display(),
        parser = args.parser.as_str(),
        file_type = %record.file_type.unwrap_or_default(),
        date_created = %record.date_created.unwrap_or_default(),
        date_released = %record.date_released.unwrap_or_default(),
        pages = %record.pages.unwrap_or_default(),
        title = %record.title.unwrap_or_default(),
        doc_location = %record.doc_location.unwrap_or_default(),
        "reconciled document"
    );

    Ok(())
}
