use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `h2s` binary.
#[derive(Debug, Parser)]
#[command(
    name = "h2s",
    version,
    about = "html2svelte - split marked-up HTML pages into Svelte components"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Report format: text, json, raw
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Convert and report without writing any files
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            dry_run: self.dry_run,
        }
    }
}
