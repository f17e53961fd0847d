//! Retention policy configuration

use serde::Serialize;
use std::fmt;

/// One of the four independent retention tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    IntraDaily,
    Daily,
    Weekly,
    Monthly,
}

impl Tier {
    /// Length of a single period in days.
    ///
    /// For the intra-daily tier the count itself is a number of days, so a
    /// "period" is one day.
    pub fn period_days(self) -> i64 {
        match self {
            Tier::IntraDaily | Tier::Daily => 1,
            Tier::Weekly => 7,
            Tier::Monthly => 30,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::IntraDaily => "intra-daily",
            Tier::Daily => "daily",
            Tier::Weekly => "weekly",
            Tier::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

/// Per-tier retention counts. Zero disables a tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RetentionPolicy {
    /// Keep every snapshot within this many days of the newest one
    pub intra_daily_days: u32,
    /// Keep the newest snapshot of each of this many 1-day periods
    pub daily_periods: u32,
    /// Keep the newest snapshot of each of this many 7-day periods
    pub weekly_periods: u32,
    /// Keep the newest snapshot of each of this many 30-day periods
    pub monthly_periods: u32,
}

impl RetentionPolicy {
    pub fn new(intra_daily_days: u32, daily_periods: u32, weekly_periods: u32, monthly_periods: u32) -> Self {
        Self {
            intra_daily_days,
            daily_periods,
            weekly_periods,
            monthly_periods,
        }
    }

    pub fn count(&self, tier: Tier) -> u32 {
        match tier {
            Tier::IntraDaily => self.intra_daily_days,
            Tier::Daily => self.daily_periods,
            Tier::Weekly => self.weekly_periods,
            Tier::Monthly => self.monthly_periods,
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "intra-daily={}d daily={} weekly={} monthly={}",
            self.intra_daily_days, self.daily_periods, self.weekly_periods, self.monthly_periods
        )
    }
}

/// Everything a single retention run needs, built once by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub dataset: String,
    pub policy: RetentionPolicy,
    pub dry_run: bool,
    /// Dry-run was imposed because the caller cannot destroy snapshots
    pub forced_dry_run: bool,
}

impl RunConfig {
    pub fn new(dataset: impl Into<String>, policy: RetentionPolicy, dry_run: bool) -> Self {
        Self {
            dataset: dataset.into(),
            policy,
            dry_run,
            forced_dry_run: false,
        }
    }

    /// Same configuration with dry-run switched on
    pub fn with_forced_dry_run(mut self) -> Self {
        self.dry_run = true;
        self.forced_dry_run = true;
        self
    }
}
