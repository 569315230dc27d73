//! Command dispatch logic for braidmap

use braidmap_core::error::Result;

use crate::cli::{Cli, Commands};
use crate::commands;

pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init {
            file,
            title,
            separate_headings,
            no_crosslink,
            config,
        } => commands::init::execute(
            cli,
            file,
            title.as_deref(),
            *separate_headings,
            *no_crosslink,
            config.as_deref(),
        ),

        Commands::Sync {
            file,
            annotate,
            dry_run,
        } => commands::sync::execute(cli, file, *annotate, *dry_run),

        Commands::Check { file } => commands::check::execute(cli, file),

        Commands::Dismiss { file } => commands::dismiss::execute(cli, file),

        Commands::Graph { file } => commands::graph::execute(cli, file),
    }
}
