use std::path::Path;

use anyhow::bail;
use h2s_config::H2sConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::BulkConvertArgs;
use crate::commands::convert::convert_document;
use crate::commands::report::{BulkReport, FailedDocument};
use crate::output::output;
use crate::progress::Progress;
use crate::walk;

/// Handle `h2s bulk-convert`.
pub fn handle(
    args: &BulkConvertArgs,
    config: &H2sConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let config = bootstrap::with_overrides(config, args.out_dir.as_deref(), args.prefix.as_deref())?;
    if !args.folder.is_dir() {
        bail!("bulk-convert: {} is not a directory", args.folder.display());
    }

    let report = convert_folder(&args.folder, Path::new(&config.output.out_dir), &config, flags.dry_run);
    output(&report, flags.format)
}

/// Convert every document under `folder`; a failing document is recorded and
/// the batch moves on.
pub fn convert_folder(folder: &Path, out_dir: &Path, config: &H2sConfig, dry_run: bool) -> BulkReport {
    let documents = walk::find_documents(folder, &config.output.input_extension);
    tracing::debug!(count = documents.len(), folder = %folder.display(), "bulk: found documents");

    let progress = Progress::documents(documents.len());
    let mut report = BulkReport::default();

    for document in &documents {
        progress.set_message(&document.display().to_string());
        let target = walk::mirrored_dir(folder, document, out_dir);

        match convert_document(document, &target, config, dry_run) {
            Ok(converted) => report.converted.push(converted),
            Err(error) => {
                tracing::warn!(source = %document.display(), error = %format!("{error:#}"), "bulk: document failed");
                progress.println(&format!("skipped {}: {error:#}", document.display()));
                report.failed.push(FailedDocument {
                    source: document.display().to_string(),
                    error: format!("{error:#}"),
                });
            }
        }
        progress.inc();
    }

    progress.finish_ok(&format!(
        "{} converted, {} failed",
        report.converted.len(),
        report.failed.len()
    ));
    report
}
