use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Convert one HTML file into Svelte components.
    Convert(ConvertArgs),
    /// Convert every HTML file under a folder, mirroring its layout.
    BulkConvert(BulkConvertArgs),
    /// Show the blocks that would be extracted from a file.
    Plan(PlanArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ConvertArgs {
    /// HTML file to convert
    pub file: PathBuf,

    /// Output directory (defaults to `output.out_dir`)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Class prefix marking extractable elements (defaults to `extract.prefix`)
    #[arg(short, long)]
    pub prefix: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct BulkConvertArgs {
    /// Folder searched recursively for HTML files
    #[arg(short, long)]
    pub folder: PathBuf,

    /// Output directory (defaults to `output.out_dir`)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Class prefix marking extractable elements (defaults to `extract.prefix`)
    #[arg(short, long)]
    pub prefix: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct PlanArgs {
    /// HTML file to plan
    pub file: PathBuf,

    /// Class prefix marking extractable elements (defaults to `extract.prefix`)
    #[arg(short, long)]
    pub prefix: Option<String>,
}
