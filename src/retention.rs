//! Tiered retention evaluation
//!
//! Every tier is anchored at the newest snapshot in the collection, not at
//! the current wall-clock time.

use crate::policy::{RetentionPolicy, Tier};
use crate::snapshot::{latest_snapshot, Snapshot};
use crate::window::snapshots_within_window;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Snapshots to keep under the intra-daily tier: everything created within
/// `days` days of the newest snapshot.
pub fn intra_daily_snapshots(snapshots: &[Snapshot], days: u32) -> Vec<Snapshot> {
    if days == 0 {
        return Vec::new();
    }

    let Some(latest) = latest_snapshot(snapshots) else {
        return Vec::new();
    };

    let start = latest.created;
    let end = days_before(start, i64::from(days)).unwrap_or(DateTime::<Utc>::MIN_UTC);
    snapshots_within_window(snapshots, start, end)
}

/// Snapshots to keep under a periodic tier: the newest snapshot in each of
/// `periods` consecutive periods of `period_days` days, counting back from
/// the newest snapshot.
///
/// Periods without any snapshot contribute nothing, so the result never has
/// more than `periods` entries.
pub fn periodic_snapshots(snapshots: &[Snapshot], periods: u32, period_days: i64) -> Vec<Snapshot> {
    if periods == 0 {
        return Vec::new();
    }

    let Some(anchor) = latest_snapshot(snapshots).map(|s| s.created) else {
        return Vec::new();
    };
    let oldest = snapshots
        .iter()
        .map(|s| s.created)
        .min()
        .unwrap_or(anchor);

    let mut keep = Vec::new();
    for period in 0..i64::from(periods) {
        let Some(start) = days_before(anchor, period * period_days) else {
            break;
        };
        let end = days_before(anchor, (period + 1) * period_days).unwrap_or(DateTime::<Utc>::MIN_UTC);

        let window = snapshots_within_window(snapshots, start, end);
        if let Some(newest) = latest_snapshot(&window) {
            keep.push(newest.clone());
        }

        // Every later period lies entirely before the oldest snapshot
        if end < oldest {
            break;
        }
    }
    keep
}

/// Sort candidates newest first and drop repeated names, keeping the first
/// occurrence in sorted order.
pub fn sort_and_dedup(mut candidates: Vec<Snapshot>) -> Vec<Snapshot> {
    candidates.sort_by(|a, b| b.created.cmp(&a.created));

    let mut seen = HashSet::new();
    candidates.retain(|snapshot| seen.insert(snapshot.name.clone()));
    candidates
}

fn days_before(time: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    let offset = Duration::try_days(days)?;
    time.checked_sub_signed(offset)
}

/// Partition of an enumerated snapshot collection into keep and prune sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetentionPlan {
    /// Snapshots retained by at least one tier, newest first
    pub keep: Vec<Snapshot>,
    /// Every other snapshot, in enumeration order
    pub prune: Vec<Snapshot>,
}

impl RetentionPlan {
    /// Evaluate all four tiers against `snapshots` and compute the prune set
    /// as the complement of their union.
    pub fn evaluate(snapshots: &[Snapshot], policy: &RetentionPolicy) -> Self {
        let mut candidates = intra_daily_snapshots(snapshots, policy.intra_daily_days);
        log::debug!(
            "{} tier selected {} candidates",
            Tier::IntraDaily,
            candidates.len()
        );

        for tier in [Tier::Daily, Tier::Weekly, Tier::Monthly] {
            let selected = periodic_snapshots(snapshots, policy.count(tier), tier.period_days());
            log::debug!("{} tier selected {} candidates", tier, selected.len());
            candidates.extend(selected);
        }

        let keep = sort_and_dedup(candidates);

        let kept: HashSet<&str> = keep.iter().map(|s| s.name.as_str()).collect();
        let mut seen = HashSet::new();
        let prune = snapshots
            .iter()
            .filter(|s| !kept.contains(s.name.as_str()) && seen.insert(s.name.as_str()))
            .cloned()
            .collect();

        Self { keep, prune }
    }

    /// True when nothing needs to be deleted
    pub fn is_noop(&self) -> bool {
        self.prune.is_empty()
    }

    pub fn kept_names(&self) -> HashSet<&str> {
        self.keep.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn pruned_names(&self) -> HashSet<&str> {
        self.prune.iter().map(|s| s.name.as_str()).collect()
    }
}
