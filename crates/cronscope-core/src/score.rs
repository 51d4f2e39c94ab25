//! Health scorer — folds classifier output and lock/config state into a
//! numeric score, a severity tier, and ordered explanatory messages.

use std::cmp::min;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::Classification;
use crate::lock::{ConfigFlags, LockInfo};
use crate::types::Snapshot;

/// Severity tier derived from the clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Score >= 80.
    Good,
    /// 50 <= score < 80.
    Warning,
    /// Score < 50.
    Critical,
}

impl Severity {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Severity::Good
        } else if score >= 50 {
            Severity::Warning
        } else {
            Severity::Critical
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Good => "good",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "good" => Ok(Severity::Good),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Aggregate counts carried in the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub total: usize,
    pub overdue: usize,
    /// Number of distinct heavy-repeating hooks.
    pub heavy: usize,
    pub orphaned: usize,
}

/// The scored health summary. Recomputed on every request — no lifecycle
/// of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Clamped to 0..=100.
    pub score: u8,
    pub severity: Severity,
    /// Conditional messages in fixed order, then the closing tier remark.
    pub messages: Vec<String>,
    pub counts: Counts,
}

/// Events above this total trigger the volume deduction.
const VOLUME_WARN_THRESHOLD: usize = 500;

/// Score the snapshot. Start at 100, apply each deduction independently,
/// clamp to 0..=100. Deductions are commutative; only message order is
/// fixed. Lock state is surfaced alongside the report, never scored.
pub fn score(
    snapshot: &Snapshot,
    classification: &Classification,
    lock: &LockInfo,
    flags: &ConfigFlags,
) -> HealthReport {
    let counts = Counts {
        total: snapshot.total,
        overdue: classification.overdue.len(),
        heavy: classification.heavy.len(),
        orphaned: classification.orphaned.len(),
    };

    let mut deduction: u32 = 0;
    let mut messages: Vec<String> = Vec::new();

    if flags.scheduler_disabled {
        deduction += 50;
        messages.push(
            "The scheduler is disabled by configuration; queued events will not run automatically."
                .to_string(),
        );
    }

    if counts.overdue > 0 {
        deduction += min(40, counts.overdue.saturating_mul(2)) as u32;
        messages.push(if counts.overdue == 1 {
            "1 scheduled event is overdue.".to_string()
        } else {
            format!("{} scheduled events are overdue.", counts.overdue)
        });
    }

    if counts.heavy > 0 {
        deduction += min(20, counts.heavy.saturating_mul(2)) as u32;
        messages.push(if counts.heavy == 1 {
            "1 hook repeats at a heavy cadence.".to_string()
        } else {
            format!("{} hooks repeat at a heavy cadence.", counts.heavy)
        });
    }

    if counts.orphaned > 0 {
        deduction += min(15, counts.orphaned) as u32;
        messages.push(if counts.orphaned == 1 {
            "1 cron hook with no callbacks attached.".to_string()
        } else {
            format!("{} cron hooks with no callbacks attached.", counts.orphaned)
        });
    }

    if counts.total > VOLUME_WARN_THRESHOLD {
        deduction += 10;
        messages.push(format!(
            "Large event queue: {} scheduled events.",
            counts.total
        ));
    }

    if counts.total == 0 {
        // Informational only — no deduction.
        messages.push("No events are currently scheduled.".to_string());
    }

    let score = 100u32.saturating_sub(deduction) as u8;
    let severity = Severity::from_score(score);

    if severity == Severity::Good && deduction == 0 {
        messages.push("Cron is running normally.".to_string());
    }

    messages.push(
        match severity {
            Severity::Good => "Scheduler health looks good.",
            Severity::Warning => "Scheduler health needs attention.",
            Severity::Critical => "Scheduler health is critical.",
        }
        .to_string(),
    );

    debug!(score, %severity, stale_lock = lock.is_stale, "health report computed");

    HealthReport {
        score,
        severity,
        messages,
        counts,
    }
}
