use h2s_config::H2sConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, config: &H2sConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Convert(args) => commands::convert::handle(args, config, flags),
        Commands::BulkConvert(args) => commands::bulk_convert::handle(args, config, flags),
        Commands::Plan(args) => commands::plan::handle(args, config, flags),
    }
}
