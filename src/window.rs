//! Time window selection over a snapshot collection

use crate::snapshot::Snapshot;
use chrono::{DateTime, Utc};

/// Select every snapshot created inside the window running from `start`
/// (newer) back to `end` (older).
///
/// The interval is half-open: a snapshot created exactly at `start` is
/// included, one created exactly at `end` is not and belongs to the next
/// older window instead.
pub fn snapshots_within_window(
    snapshots: &[Snapshot],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Snapshot> {
    snapshots
        .iter()
        .filter(|snapshot| in_window(snapshot.created, start, end))
        .cloned()
        .collect()
}

fn in_window(created: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    (created < start && created > end) || created == start
}
