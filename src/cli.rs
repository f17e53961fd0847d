//! Command-line interface for zfstools

use crate::policy::RetentionPolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zfstools")]
#[command(about = "Tiered retention pruning for ZFS dataset snapshots")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Append report lines to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Command used to invoke zfs, e.g. "sudo zfs"
    #[arg(long, global = true, default_value = "zfs")]
    pub zfs_command: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Delete snapshots not retained by the retention policy
    Retention {
        /// Dataset whose snapshots are pruned
        dataset: String,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Perform a dry run and do not delete any snapshots
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show a progress bar while pruning
        #[arg(long)]
        progress: bool,
    },

    /// Show which snapshots the retention policy keeps and prunes
    Plan {
        /// Dataset to evaluate
        dataset: String,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Retention { .. } => "retention",
            Commands::Plan { .. } => "plan",
        }
    }
}

/// Per-tier retention counts. All four are required.
#[derive(Args, Debug, Clone)]
pub struct PolicyArgs {
    /// Intra-daily retention in days
    #[arg(short = 'i', long = "intra-daily")]
    pub intra_daily: u32,

    /// Daily retention in days
    #[arg(short = 'd', long)]
    pub daily: u32,

    /// Weekly retention in weeks
    #[arg(short = 'w', long)]
    pub weekly: u32,

    /// Monthly retention in months
    #[arg(short = 'm', long)]
    pub monthly: u32,
}

impl PolicyArgs {
    pub fn to_policy(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.intra_daily, self.daily, self.weekly, self.monthly)
    }
}

/// Parse output format string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}
