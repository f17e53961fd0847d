//! Storage subsystem collaborators
//!
//! The retention logic only talks to a [`SnapshotStore`]. [`ZfsCli`] is the
//! production implementation and shells out to the `zfs` command.

use crate::error::{Result, ZfsToolsError};
use crate::snapshot::Snapshot;
use std::process::{Command, Output};

/// Operations the retention driver needs from the storage subsystem
pub trait SnapshotStore {
    /// Whether the dataset exists
    fn dataset_exists(&self, dataset: &str) -> bool;

    /// Enumerate the snapshots of a dataset
    fn list_snapshots(&self, dataset: &str) -> Result<Vec<Snapshot>>;

    /// Destroy a snapshot, or only describe the destruction when `simulate`
    /// is set. Returns the command's report text.
    fn destroy_snapshot(&self, name: &str, simulate: bool) -> Result<String>;
}

/// [`SnapshotStore`] backed by the `zfs` command line tool
#[derive(Debug, Clone)]
pub struct ZfsCli {
    program: String,
    prefix_args: Vec<String>,
}

impl Default for ZfsCli {
    fn default() -> Self {
        Self {
            program: "zfs".to_string(),
            prefix_args: Vec::new(),
        }
    }
}

impl ZfsCli {
    /// Build from a whitespace separated command line such as `sudo zfs`
    pub fn from_command(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| ZfsToolsError::config("zfs command is empty"))?;

        Ok(Self {
            program,
            prefix_args: parts.collect(),
        })
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        let output = Command::new(&self.program)
            .args(&self.prefix_args)
            .args(args)
            .output()
            .map_err(|e| ZfsToolsError::zfs_command(self.describe(args), e.to_string()))?;
        Ok(output)
    }

    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(ZfsToolsError::zfs_command(self.describe(args), message));
        }
        Ok(String::from_utf8(output.stdout)?)
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.prefix_args.iter().map(String::as_str));
        parts.extend_from_slice(args);
        parts.join(" ")
    }
}

impl SnapshotStore for ZfsCli {
    fn dataset_exists(&self, dataset: &str) -> bool {
        match self.run(&["list", "-t", "filesystem", dataset]) {
            Ok(output) => output.status.success(),
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    fn list_snapshots(&self, dataset: &str) -> Result<Vec<Snapshot>> {
        let stdout = self.run_checked(&["list", "-Hp", "-t", "snapshot", "-o", "name,creation", dataset])?;
        Ok(parse_snapshot_list(&stdout))
    }

    fn destroy_snapshot(&self, name: &str, simulate: bool) -> Result<String> {
        if simulate {
            self.run_checked(&["destroy", "-v", "-n", name])
        } else {
            self.run_checked(&["destroy", "-v", name])
        }
    }
}

/// Parse `zfs list -Hp -o name,creation` output.
///
/// Blank lines are ignored. Lines without a parseable epoch are skipped.
pub fn parse_snapshot_list(text: &str) -> Vec<Snapshot> {
    let mut snapshots = Vec::new();

    for line in text.lines() {
        let mut fields = line.split_whitespace();
        let (Some(name), Some(creation)) = (fields.next(), fields.next()) else {
            if !line.trim().is_empty() {
                log::warn!("Skipping malformed snapshot line: {:?}", line);
            }
            continue;
        };

        match creation.parse::<i64>().ok().and_then(|secs| Snapshot::from_epoch(name, secs)) {
            Some(snapshot) => snapshots.push(snapshot),
            None => log::warn!("Skipping snapshot {} with invalid creation time {:?}", name, creation),
        }
    }

    snapshots
}
