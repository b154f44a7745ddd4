use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use h2s_config::H2sConfig;
use h2s_parser::{Converter, has_extension};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConvertArgs;
use crate::commands::report::ConversionReport;
use crate::output::output;
use crate::progress::Progress;
use crate::writer;

/// Handle `h2s convert`.
pub fn handle(args: &ConvertArgs, config: &H2sConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = bootstrap::with_overrides(config, args.out_dir.as_deref(), args.prefix.as_deref())?;
    let out_dir = Path::new(&config.output.out_dir);

    let progress = Progress::spinner(&format!("converting {}", args.file.display()));
    let result = convert_document(&args.file, out_dir, &config, flags.dry_run);
    match &result {
        Ok(_) => progress.finish_clear(),
        Err(_) => progress.finish_err("conversion failed"),
    }

    output(&result?, flags.format)
}

/// Read, convert, and (unless `dry_run`) write one document.
pub fn convert_document(
    source: &Path,
    out_dir: &Path,
    config: &H2sConfig,
    dry_run: bool,
) -> anyhow::Result<ConversionReport> {
    let input_extension = &config.output.input_extension;
    if !source.to_str().is_some_and(|p| has_extension(p, input_extension)) {
        bail!(
            "{} is not a .{input_extension} file",
            source.display()
        );
    }

    let document = fs::read_to_string(source)
        .with_context(|| format!("failed to read {}", source.display()))?;
    let name = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("{} has no usable file name", source.display()))?;

    let converter = Converter::new(bootstrap::extract_options(config));
    let conversion = converter
        .convert(&document, name)
        .with_context(|| format!("failed to convert {}", source.display()))?;
    tracing::debug!(
        source = %source.display(),
        components = conversion.fragments.len(),
        "convert: document converted"
    );

    let writes = writer::plan_writes(&conversion, out_dir, &config.output.fragment_extension);
    if !dry_run {
        writer::write_all(&writes)?;
    }
    Ok(ConversionReport::new(source, &conversion, &writes, !dry_run))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PAGE: &str = concat!(
        "<main>",
        "<div class=\"comp_nav-bar\"><a href=\"/\">Home</a></div>",
        "<div class=\"comp_card\"><span>Hi</span></div>",
        "</main>"
    );

    #[test]
    fn index_document_becomes_app_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("index.html");
        fs::write(&source, PAGE).expect("write source");
        let out = dir.path().join("build");

        let report = convert_document(&source, &out, &H2sConfig::default(), false)
            .expect("conversion succeeds");

        assert_eq!(report.root, "App");
        assert_eq!(report.components, vec!["NavBar", "Card"]);
        assert!(report.written);
        assert_eq!(
            fs::read_to_string(out.join("Card.svelte")).expect("card"),
            "<div class=\"card\"><span>Hi</span></div>\n"
        );
        let app = fs::read_to_string(out.join("App.svelte")).expect("app");
        assert!(app.contains("import NavBar from './NavBar.svelte';"));
        assert!(app.contains("import Card from './Card.svelte';"));
        assert!(app.contains("<main><NavBar /><Card /></main>"));
    }

    #[test]
    fn other_documents_keep_their_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("about.html");
        fs::write(&source, "<p>About</p>").expect("write source");

        let report = convert_document(&source, dir.path(), &H2sConfig::default(), false)
            .expect("conversion succeeds");
        assert_eq!(report.root, "about");
        assert!(dir.path().join("about.svelte").is_file());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("index.html");
        fs::write(&source, PAGE).expect("write source");
        let out = dir.path().join("build");

        let report = convert_document(&source, &out, &H2sConfig::default(), true)
            .expect("conversion succeeds");
        assert!(!report.written);
        assert_eq!(report.files.len(), 3);
        assert!(!out.exists());
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("notes.txt");
        fs::write(&source, "<p>x</p>").expect("write source");

        let err = convert_document(&source, dir.path(), &H2sConfig::default(), false)
            .expect_err("not html");
        assert!(err.to_string().contains("is not a .html file"));
    }

    #[test]
    fn malformed_document_reports_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("broken.html");
        fs::write(&source, "<div class=\"comp_a\">1 < 2</div>").expect("write source");

        let err = convert_document(&source, dir.path(), &H2sConfig::default(), false)
            .expect_err("malformed");
        let message = format!("{err:#}");
        assert!(message.contains("failed to convert"));
        assert!(message.contains("broken.html"));
    }
}
