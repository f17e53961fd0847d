//! Command implementations for zfstools CLI

use crate::cli::{Commands, OutputFormat, PolicyArgs};
use crate::driver::{PlanOutcome, RetentionRun, RunOutcome};
use crate::error::{Result, ZfsToolsError};
use crate::logger::{Reporter, RunLogger};
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::policy::RunConfig;
use crate::privileges::PrivilegeHelper;
use crate::zfs::ZfsCli;
use std::path::Path;

/// Options shared by every command
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions<'a> {
    pub log_file: Option<&'a Path>,
    pub zfs_command: &'a str,
}

/// Execute a command
pub fn execute_command(command: Commands, options: GlobalOptions<'_>) -> Result<()> {
    match command {
        Commands::Retention {
            dataset,
            policy,
            dry_run,
            progress,
        } => retention_command(options, &dataset, &policy, dry_run, progress),
        Commands::Plan {
            dataset,
            policy,
            format,
        } => plan_command(options, &dataset, &policy, &format),
    }
}

/// Prune snapshots of a dataset
fn retention_command(
    options: GlobalOptions<'_>,
    dataset: &str,
    policy: &PolicyArgs,
    dry_run: bool,
    progress: bool,
) -> Result<()> {
    let store = ZfsCli::from_command(options.zfs_command)?;
    let mut logger = RunLogger::new(options.log_file, "RET")?;

    let mut config = RunConfig::new(dataset, policy.to_policy(), dry_run);
    if !config.dry_run && !PrivilegeHelper::can_destroy() {
        logger.log("This command must be run as root, enabling dry run to simulate the command");
        config = config.with_forced_dry_run();
    }

    let outcome = RetentionRun::new(&store, &mut logger)
        .with_progress(progress)
        .run(&config)?;

    if let RunOutcome::Pruned(summary) = outcome {
        let verb = if summary.dry_run { "Simulated pruning of" } else { "Pruned" };
        logger.log(&format!(
            "{} {} of {} snapshots for dataset {}, kept {}",
            verb,
            summary.pruned.len(),
            summary.attempted(),
            config.dataset,
            summary.kept
        ));
        if summary.has_failures() {
            log::warn!(
                "{} snapshot deletions failed: {}",
                summary.failed.len(),
                summary.failed.join(", ")
            );
        }
    }

    Ok(())
}

/// Show the keep and prune sets without deleting anything
fn plan_command(options: GlobalOptions<'_>, dataset: &str, policy: &PolicyArgs, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format).map_err(ZfsToolsError::invalid_input)?;
    let store = ZfsCli::from_command(options.zfs_command)?;

    // Keep stdout clean for JSON consumers
    let mut logger = RunLogger::new(options.log_file, "PLN")?;
    if format == OutputFormat::Json {
        logger = logger.without_console();
    }

    let config = RunConfig::new(dataset, policy.to_policy(), true);
    let outcome = RetentionRun::new(&store, &mut logger).plan(&config)?;

    print_plan(&format, &config, &outcome)
}

fn print_plan(format: &OutputFormat, config: &RunConfig, outcome: &PlanOutcome) -> Result<()> {
    match format {
        OutputFormat::Pretty => PrettyPrinter::print_plan(&config.dataset, &config.policy, outcome),
        OutputFormat::Json => {
            println!("{}", JsonFormatter::plan_to_json(&config.dataset, &config.policy, outcome)?);
        }
    }
    Ok(())
}
