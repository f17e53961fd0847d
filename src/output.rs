//! Output formatting utilities

use crate::driver::PlanOutcome;
use crate::error::Result;
use crate::policy::RetentionPolicy;
use crate::retention::RetentionPlan;
use crate::snapshot::Snapshot;
use serde_json::{json, Value};

/// Pretty printer for zfstools output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the keep and prune sets of a retention plan
    pub fn print_plan(dataset: &str, policy: &RetentionPolicy, outcome: &PlanOutcome) {
        print!("{}", Self::format_plan(dataset, policy, outcome));
    }

    pub fn format_plan(dataset: &str, policy: &RetentionPolicy, outcome: &PlanOutcome) -> String {
        let mut out = String::new();
        out.push_str(&format!("📸 Retention plan for {}\n", dataset));
        out.push_str(&format!("├─ Policy: {}\n", policy));

        let plan = match outcome {
            PlanOutcome::Evaluated(plan) => plan,
            PlanOutcome::NoSnapshots => {
                out.push_str("└─ No snapshots\n");
                return out;
            }
            PlanOutcome::ListingFailed { error } => {
                out.push_str(&format!("└─ ❌ Snapshot listing failed: {}\n", error));
                return out;
            }
        };

        out.push_str(&format!("├─ Keep: {}\n", plan.keep.len()));
        push_snapshot_list(&mut out, "│  ", &plan.keep);
        out.push_str(&format!("└─ Prune: {}\n", plan.prune.len()));
        push_snapshot_list(&mut out, "   ", &plan.prune);
        out
    }
}

fn push_snapshot_list(out: &mut String, indent: &str, snapshots: &[Snapshot]) {
    for (i, snapshot) in snapshots.iter().enumerate() {
        let prefix = if i == snapshots.len() - 1 { "└─" } else { "├─" };
        out.push_str(&format!(
            "{}{} {} ({})\n",
            indent,
            prefix,
            snapshot.name,
            snapshot.created.format("%Y-%m-%d %H:%M:%S")
        ));
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Plan as JSON. A failed listing adds a `listing_error` field next to
    /// the empty keep and prune sets.
    pub fn plan_value(dataset: &str, policy: &RetentionPolicy, outcome: &PlanOutcome) -> Result<Value> {
        let empty = RetentionPlan::default();
        let plan = outcome.plan().unwrap_or(&empty);

        let mut value = json!({
            "dataset": dataset,
            "policy": serde_json::to_value(policy)?,
            "keep": serde_json::to_value(&plan.keep)?,
            "prune": serde_json::to_value(&plan.prune)?,
        });
        if let Some(error) = outcome.listing_error() {
            value["listing_error"] = Value::String(error.to_string());
        }
        Ok(value)
    }

    pub fn plan_to_json(dataset: &str, policy: &RetentionPolicy, outcome: &PlanOutcome) -> Result<String> {
        let value = Self::plan_value(dataset, policy, outcome)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
