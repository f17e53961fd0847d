//! # zfstools
//!
//! Tiered retention for ZFS snapshots: decide which snapshots of a dataset
//! to keep under intra-daily, daily, weekly and monthly policies, and prune
//! the rest.

pub mod cli;
pub mod error;
pub mod snapshot;
pub mod window;
pub mod policy;
pub mod retention;
pub mod zfs;
pub mod logger;
pub mod driver;
pub mod commands;
pub mod output;
pub mod progress;
pub mod privileges;

pub use error::{Result, ZfsToolsError};
pub use policy::{RetentionPolicy, RunConfig, Tier};
pub use retention::RetentionPlan;
pub use snapshot::Snapshot;
pub use driver::{PlanOutcome, RetentionRun, RunOutcome, PruneSummary};
