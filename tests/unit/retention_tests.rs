//! Unit tests for tier evaluation and aggregation

use crate::common::{snap, sorted_names, DAY, HOUR};
use std::collections::HashSet;
use zfstools::retention::{intra_daily_snapshots, periodic_snapshots, sort_and_dedup};
use zfstools::{RetentionPlan, RetentionPolicy, Snapshot};

/// Hourly snapshots going back `days` days from `newest`
fn hourly_history(newest: i64, days: i64) -> Vec<Snapshot> {
    (0..days * 24)
        .map(|h| snap(&format!("tank/data@hourly-{}", h), newest - h * HOUR))
        .collect()
}

fn assert_partition(snapshots: &[Snapshot], plan: &RetentionPlan) {
    let keep = plan.kept_names();
    let prune = plan.pruned_names();
    assert!(keep.is_disjoint(&prune), "keep and prune sets overlap");

    let all: HashSet<&str> = snapshots.iter().map(|s| s.name.as_str()).collect();
    let union: HashSet<&str> = keep.union(&prune).copied().collect();
    assert_eq!(union, all);
}

#[test]
fn test_intra_daily_scenario() {
    // A@100h, B@90h, C@10h with one day of intra-daily retention
    let snapshots = vec![snap("A", 100 * HOUR), snap("B", 90 * HOUR), snap("C", 10 * HOUR)];
    let plan = RetentionPlan::evaluate(&snapshots, &RetentionPolicy::new(1, 0, 0, 0));

    assert_eq!(sorted_names(&plan.keep), vec!["A", "B"]);
    assert_eq!(sorted_names(&plan.prune), vec!["C"]);
}

#[test]
fn test_all_tiers_zero_prunes_everything() {
    let snapshots = hourly_history(30 * DAY, 3);
    let plan = RetentionPlan::evaluate(&snapshots, &RetentionPolicy::default());

    assert!(plan.keep.is_empty());
    assert_eq!(plan.prune.len(), snapshots.len());
}

#[test]
fn test_empty_collection() {
    let plan = RetentionPlan::evaluate(&[], &RetentionPolicy::new(3, 7, 4, 12));
    assert!(plan.keep.is_empty());
    assert!(plan.prune.is_empty());
    assert!(plan.is_noop());
}

#[test]
fn test_zero_counts_contribute_nothing() {
    let snapshots = hourly_history(100 * DAY, 2);
    assert!(intra_daily_snapshots(&snapshots, 0).is_empty());
    assert!(periodic_snapshots(&snapshots, 0, 1).is_empty());
    assert!(periodic_snapshots(&snapshots, 0, 7).is_empty());
    assert!(periodic_snapshots(&snapshots, 0, 30).is_empty());
}

#[test]
fn test_periodic_never_exceeds_period_count() {
    let snapshots = hourly_history(400 * DAY, 90);
    for (periods, days) in [(1, 1), (5, 1), (3, 7), (2, 30), (40, 30)] {
        let keep = periodic_snapshots(&snapshots, periods, days);
        assert!(keep.len() <= periods as usize, "{} periods of {} days kept {}", periods, days, keep.len());
    }
}

#[test]
fn test_daily_keeps_newest_per_day() {
    let newest = 50 * DAY;
    let snapshots = hourly_history(newest, 10);
    let keep = periodic_snapshots(&snapshots, 7, 1);

    assert_eq!(keep.len(), 7);
    for (i, snapshot) in keep.iter().enumerate() {
        assert_eq!(snapshot.epoch(), newest - i as i64 * DAY);
    }
}

#[test]
fn test_weekly_and_monthly_tiers() {
    let newest = 400 * DAY;
    let snapshots: Vec<Snapshot> = (0..120)
        .map(|d| snap(&format!("tank@daily-{}", d), newest - d * DAY))
        .collect();

    let weekly = periodic_snapshots(&snapshots, 4, 7);
    let epochs: Vec<i64> = weekly.iter().map(|s| s.epoch()).collect();
    assert_eq!(epochs, vec![newest, newest - 7 * DAY, newest - 14 * DAY, newest - 21 * DAY]);

    let monthly = periodic_snapshots(&snapshots, 6, 30);
    assert_eq!(monthly.len(), 4);
    assert_eq!(monthly[3].epoch(), newest - 90 * DAY);
}

#[test]
fn test_combined_policy_partitions_collection() {
    let snapshots = hourly_history(365 * DAY, 60);
    let plan = RetentionPlan::evaluate(&snapshots, &RetentionPolicy::new(1, 7, 4, 2));

    assert_partition(&snapshots, &plan);
    // 24 intra-daily hours plus older daily, weekly and monthly picks
    assert!(plan.keep.len() >= 24);
    assert!(plan.keep.len() <= 24 + 7 + 4 + 2);

    let created: Vec<_> = plan.keep.iter().map(|s| s.created).collect();
    let mut sorted = created.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(created, sorted, "keep set should be newest first");
}

#[test]
fn test_dedup_is_idempotent() {
    let snapshots = hourly_history(10 * DAY, 3);
    let mut candidates = intra_daily_snapshots(&snapshots, 2);
    candidates.extend(periodic_snapshots(&snapshots, 3, 1));

    let once = sort_and_dedup(candidates);
    let twice = sort_and_dedup(once.clone());
    assert_eq!(once, twice);

    let plan_a = RetentionPlan::evaluate(&snapshots, &RetentionPolicy::new(2, 3, 1, 1));
    let plan_b = RetentionPlan::evaluate(&snapshots, &RetentionPolicy::new(2, 3, 1, 1));
    assert_eq!(plan_a, plan_b);
}

#[test]
fn test_evaluation_ignores_input_order() {
    let mut snapshots = hourly_history(20 * DAY, 5);
    let policy = RetentionPolicy::new(1, 3, 1, 0);
    let forward = RetentionPlan::evaluate(&snapshots, &policy);

    snapshots.reverse();
    let backward = RetentionPlan::evaluate(&snapshots, &policy);

    assert_eq!(sorted_names(&forward.keep), sorted_names(&backward.keep));
    assert_eq!(sorted_names(&forward.prune), sorted_names(&backward.prune));
}
