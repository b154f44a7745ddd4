//! Emission: turn a finished conversion into files on disk.
//!
//! Fragments are written in emission order, the root last. A failed write
//! stops the remaining writes for that document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use h2s_parser::Conversion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    pub path: PathBuf,
    pub content: String,
}

/// Paths and contents for every component of `conversion` under `out_dir`.
pub fn plan_writes(conversion: &Conversion, out_dir: &Path, extension: &str) -> Vec<PlannedWrite> {
    conversion
        .fragments
        .iter()
        .chain(std::iter::once(&conversion.root))
        .map(|fragment| PlannedWrite {
            path: out_dir.join(format!("{}.{extension}", fragment.name)),
            content: fragment.content.clone(),
        })
        .collect()
}

/// Write each planned file, creating parent directories as needed.
pub fn write_all(writes: &[PlannedWrite]) -> anyhow::Result<()> {
    for write in writes {
        if let Some(parent) = write.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&write.path, &write.content)
            .with_context(|| format!("failed to write {}", write.path.display()))?;
        tracing::info!(path = %write.path.display(), "writer: wrote component");
    }
    Ok(())
}
