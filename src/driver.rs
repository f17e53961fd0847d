//! Retention run orchestration
//!
//! A run moves through validate, enumerate, evaluate, prune and report.
//! Only the storage collaborators can fail; the evaluation itself is pure.

use crate::error::{Result, ZfsToolsError};
use crate::logger::Reporter;
use crate::policy::RunConfig;
use crate::progress::PruneProgress;
use crate::retention::RetentionPlan;
use crate::snapshot::Snapshot;
use crate::zfs::SnapshotStore;
use std::time::Duration;

/// Pause between successive deletions
pub const DEFAULT_PRUNE_DELAY: Duration = Duration::from_secs(1);

/// How a run that did not hit a fatal error ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The dataset has no snapshots
    NoSnapshots,
    /// Enumeration failed and the run degraded to a no-op
    ListingFailed { error: String },
    /// Every snapshot is retained by some tier
    NothingToPrune { kept: usize },
    /// The prune loop ran
    Pruned(PruneSummary),
}

/// What a plan-only run found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Snapshots were enumerated and partitioned
    Evaluated(RetentionPlan),
    /// The dataset has no snapshots
    NoSnapshots,
    /// Enumeration failed, so nothing was evaluated
    ListingFailed { error: String },
}

impl PlanOutcome {
    pub fn plan(&self) -> Option<&RetentionPlan> {
        match self {
            PlanOutcome::Evaluated(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn listing_error(&self) -> Option<&str> {
        match self {
            PlanOutcome::ListingFailed { error } => Some(error.as_str()),
            _ => None,
        }
    }
}

/// Result of the prune loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneSummary {
    pub kept: usize,
    /// Snapshots destroyed, or that would have been in a dry run
    pub pruned: Vec<String>,
    /// Snapshots whose deletion failed
    pub failed: Vec<String>,
    pub dry_run: bool,
}

impl PruneSummary {
    pub fn attempted(&self) -> usize {
        self.pruned.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Drives a single retention run against a snapshot store
pub struct RetentionRun<'a, S: SnapshotStore + ?Sized, R: Reporter + ?Sized> {
    store: &'a S,
    reporter: &'a mut R,
    delay: Duration,
    show_progress: bool,
}

impl<'a, S: SnapshotStore + ?Sized, R: Reporter + ?Sized> RetentionRun<'a, S, R> {
    pub fn new(store: &'a S, reporter: &'a mut R) -> Self {
        Self {
            store,
            reporter,
            delay: DEFAULT_PRUNE_DELAY,
            show_progress: false,
        }
    }

    /// Override the pause between deletions
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run the full retention cycle.
    ///
    /// Returns `Err` only when the dataset does not exist. Listing and
    /// deletion failures are reported and reflected in the outcome.
    pub fn run(&mut self, config: &RunConfig) -> Result<RunOutcome> {
        self.validate(config)?;

        if config.dry_run && !config.forced_dry_run {
            self.reporter.log("Performing dry run - no snapshots will be deleted");
        }

        let snapshots = match self.enumerate(config) {
            Ok(snapshots) => snapshots,
            Err(outcome) => return Ok(outcome),
        };

        let plan = self.evaluate(config, &snapshots);
        if plan.is_noop() {
            self.reporter
                .log(&format!("No snapshots to prune for dataset {}", config.dataset));
            return Ok(RunOutcome::NothingToPrune { kept: plan.keep.len() });
        }

        Ok(RunOutcome::Pruned(self.prune(config, &plan)))
    }

    /// Validate, enumerate and evaluate without deleting anything
    pub fn plan(&mut self, config: &RunConfig) -> Result<PlanOutcome> {
        self.validate(config)?;
        let outcome = match self.enumerate(config) {
            Ok(snapshots) => PlanOutcome::Evaluated(self.evaluate(config, &snapshots)),
            Err(RunOutcome::ListingFailed { error }) => PlanOutcome::ListingFailed { error },
            Err(_) => PlanOutcome::NoSnapshots,
        };
        Ok(outcome)
    }

    fn validate(&mut self, config: &RunConfig) -> Result<()> {
        if !self.store.dataset_exists(&config.dataset) {
            self.reporter
                .log(&format!("Dataset {} does not exist", config.dataset));
            return Err(ZfsToolsError::dataset_not_found(&config.dataset));
        }
        Ok(())
    }

    fn enumerate(&mut self, config: &RunConfig) -> std::result::Result<Vec<Snapshot>, RunOutcome> {
        let snapshots = match self.store.list_snapshots(&config.dataset) {
            Ok(snapshots) => snapshots,
            Err(e) => {
                log::warn!("Snapshot listing failed for {}: {}", config.dataset, e);
                self.reporter.log(&format!(
                    "Failed to list snapshots for dataset {}, treating as no snapshots: {}",
                    config.dataset, e
                ));
                return Err(RunOutcome::ListingFailed { error: e.to_string() });
            }
        };

        if snapshots.is_empty() {
            self.reporter
                .log(&format!("No snapshots found for dataset {}", config.dataset));
            return Err(RunOutcome::NoSnapshots);
        }

        log::debug!("Found {} snapshots for {}", snapshots.len(), config.dataset);
        Ok(snapshots)
    }

    fn evaluate(&mut self, config: &RunConfig, snapshots: &[Snapshot]) -> RetentionPlan {
        let plan = RetentionPlan::evaluate(snapshots, &config.policy);
        log::debug!(
            "Policy {} keeps {} and prunes {} snapshots of {}",
            config.policy,
            plan.keep.len(),
            plan.prune.len(),
            config.dataset
        );
        plan
    }

    fn prune(&mut self, config: &RunConfig, plan: &RetentionPlan) -> PruneSummary {
        self.reporter.log(&format!(
            "Pruning {} snapshots for dataset {}",
            plan.prune.len(),
            config.dataset
        ));

        let mut progress = if self.show_progress {
            PruneProgress::new(plan.prune.len() as u64, config.dry_run)
        } else {
            PruneProgress::new_minimal()
        };

        let mut summary = PruneSummary {
            kept: plan.keep.len(),
            dry_run: config.dry_run,
            ..Default::default()
        };

        for (index, snapshot) in plan.prune.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }

            let line = match self.store.destroy_snapshot(&snapshot.name, config.dry_run) {
                Ok(output) => {
                    summary.pruned.push(snapshot.name.clone());
                    destroy_report(&snapshot.name, &output, config.dry_run)
                }
                Err(e) => {
                    summary.failed.push(snapshot.name.clone());
                    format!("Error deleting snapshot {}: {}", snapshot.name, e)
                }
            };

            let reporter = &mut *self.reporter;
            progress.suspend(|| reporter.log(&line));
            progress.inc(&snapshot.name);
        }

        progress.finish("done");
        summary
    }
}

/// Collapse the destroy command output onto one report line
fn destroy_report(name: &str, output: &str, dry_run: bool) -> String {
    let text = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    if !text.is_empty() {
        text
    } else if dry_run {
        format!("Would destroy snapshot {}", name)
    } else {
        format!("Destroyed snapshot {}", name)
    }
}
