//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Build the config loader from the global options.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code mapping (see `error` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let loader = cli.loader();
    tracing::debug!(?loader, "Dispatching command");

    match cli.command {
        Commands::Show { output } => commands::show::run(&loader, output),
        Commands::Check => commands::check::run(&loader),
        Commands::Env { dotenv } => commands::env::run(&cli.app, dotenv),
    }
}
