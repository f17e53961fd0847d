//! Main entry point for zfstools CLI

use anyhow::Context;
use clap::Parser;
use zfstools::cli::Cli;
use zfstools::commands::{execute_command, GlobalOptions};
use zfstools::logger::init_diagnostics;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging, at debug level when verbose
    init_diagnostics(cli.verbose);

    let options = GlobalOptions {
        log_file: cli.log_file.as_deref(),
        zfs_command: &cli.zfs_command,
    };

    // Execute the command
    let name = cli.command.name();
    execute_command(cli.command, options).with_context(|| format!("{} command failed", name))
}
