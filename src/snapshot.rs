//! Snapshot records as enumerated from the storage subsystem

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

/// A single dataset snapshot.
///
/// `name` identifies the snapshot within a run; two records carrying the
/// same name are treated as the same snapshot even if their timestamps differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Full snapshot name, e.g. `tank/data@auto-2024-01-01`
    pub name: String,
    /// Creation time with second resolution
    pub created: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(name: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            created,
        }
    }

    /// Build a snapshot from a Unix epoch in seconds.
    ///
    /// Returns `None` when the epoch falls outside the range chrono can represent.
    pub fn from_epoch(name: impl Into<String>, secs: i64) -> Option<Self> {
        let created = Utc.timestamp_opt(secs, 0).single()?;
        Some(Self::new(name, created))
    }

    /// Creation time as whole seconds since the Unix epoch
    pub fn epoch(&self) -> i64 {
        self.created.timestamp()
    }
}

/// Find the most recently created snapshot.
///
/// When several snapshots share the newest timestamp the first one wins.
pub fn latest_snapshot(snapshots: &[Snapshot]) -> Option<&Snapshot> {
    snapshots.iter().fold(None, |latest: Option<&Snapshot>, snapshot| match latest {
        Some(current) if current.created >= snapshot.created => Some(current),
        _ => Some(snapshot),
    })
}
