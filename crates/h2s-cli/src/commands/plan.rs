use std::fs;

use anyhow::Context;
use h2s_config::H2sConfig;
use h2s_parser::{Block, plan};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::PlanArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PlanReport {
    source: String,
    prefix: String,
    blocks: Vec<Block>,
}

/// Handle `h2s plan`.
pub fn handle(args: &PlanArgs, config: &H2sConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = bootstrap::with_overrides(config, None, args.prefix.as_deref())?;
    let document = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let blocks = plan(&document, &config.extract.prefix)
        .with_context(|| format!("failed to plan {}", args.file.display()))?;

    output(
        &PlanReport {
            source: args.file.display().to_string(),
            prefix: config.extract.prefix,
            blocks,
        },
        flags.format,
    )
}
