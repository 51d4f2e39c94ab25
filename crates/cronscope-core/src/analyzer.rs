//! Pipeline orchestrator — validates options once, then runs
//! snapshot → classify → inspect → score over caller-supplied inputs.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::classify::{classify, Classification};
use crate::error::{CoreError, Result};
use crate::lock::{inspect_lock, ConfigFlags, LockInfo};
use crate::score::{score, HealthReport};
use crate::snapshot::build_snapshot;
use crate::types::{HookRegistry, RecurrenceRegistry, Snapshot};

/// Default tolerance before a past-due timestamp counts as overdue.
pub const DEFAULT_GRACE_SECS: i64 = 60;
/// Default cutoff below which a recurrence interval counts as heavy.
pub const DEFAULT_HEAVY_THRESHOLD_SECS: i64 = 300;

/// Evaluation-time clock, injected by the caller so runs are reproducible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Clock {
    /// Coarse epoch seconds, used for overdue comparisons.
    pub epoch_secs: i64,
    /// High-resolution epoch seconds, used for lock staleness.
    pub epoch_secs_high_res: f64,
}

impl Clock {
    /// A fixed clock for deterministic runs and tests.
    pub fn fixed(epoch_secs: i64) -> Self {
        Self {
            epoch_secs,
            epoch_secs_high_res: epoch_secs as f64,
        }
    }

    /// Capture the system clock once.
    pub fn system() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            // Fallback to 0 only if the system clock is broken — acceptable.
            .unwrap_or_default();
        Self {
            epoch_secs: elapsed.as_secs() as i64,
            epoch_secs_high_res: elapsed.as_secs_f64(),
        }
    }
}

/// Tunable thresholds, validated once at [`Analyzer::new`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalyzerOptions {
    pub grace_secs: i64,
    pub heavy_threshold_secs: i64,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            grace_secs: DEFAULT_GRACE_SECS,
            heavy_threshold_secs: DEFAULT_HEAVY_THRESHOLD_SECS,
        }
    }
}

/// Everything one analysis run reads. All references — the engine owns no
/// state and performs no I/O beyond these inputs.
pub struct AnalysisInput<'a> {
    /// Raw scheduler table: timestamp → hook → instances, as loose JSON.
    pub raw_events: &'a Value,
    pub recurrences: &'a RecurrenceRegistry,
    pub hooks: &'a dyn HookRegistry,
    /// Persisted lock value, shape-checked by the lock inspector.
    pub raw_lock: Option<&'a Value>,
    pub flags: ConfigFlags,
    pub clock: Clock,
}

/// Full analysis output. Lists are never truncated here — slicing for
/// display is a presentation decision.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub snapshot: Snapshot,
    pub classification: Classification,
    pub lock: LockInfo,
    pub flags: ConfigFlags,
    pub health: HealthReport,
}

/// The read-only analysis engine. Holds validated thresholds only; every
/// call is a pure function of its input, so shared use across threads
/// needs no locking.
#[derive(Debug, Clone)]
pub struct Analyzer {
    grace_secs: i64,
    heavy_threshold_secs: u64,
}

impl Analyzer {
    /// Validate options once. Negative thresholds are rejected here so the
    /// per-call path never has to.
    pub fn new(opts: AnalyzerOptions) -> Result<Self> {
        if opts.grace_secs < 0 {
            return Err(CoreError::InvalidOption(format!(
                "grace_secs must be non-negative, got {}",
                opts.grace_secs
            )));
        }
        if opts.heavy_threshold_secs < 0 {
            return Err(CoreError::InvalidOption(format!(
                "heavy_threshold_secs must be non-negative, got {}",
                opts.heavy_threshold_secs
            )));
        }
        Ok(Self {
            grace_secs: opts.grace_secs,
            heavy_threshold_secs: opts.heavy_threshold_secs as u64,
        })
    }

    pub fn grace_secs(&self) -> i64 {
        self.grace_secs
    }

    pub fn heavy_threshold_secs(&self) -> u64 {
        self.heavy_threshold_secs
    }

    /// Run the full pipeline over one immutable set of inputs.
    pub fn analyze(&self, input: AnalysisInput<'_>) -> Result<Analysis> {
        let snapshot = build_snapshot(input.raw_events, input.recurrences, input.clock.epoch_secs);
        let classification = classify(
            &snapshot,
            input.hooks,
            self.grace_secs,
            self.heavy_threshold_secs,
        )?;
        let lock = inspect_lock(input.raw_lock, input.clock.epoch_secs_high_res);
        let health = score(&snapshot, &classification, &lock, &input.flags);

        info!(
            total = snapshot.total,
            overdue = health.counts.overdue,
            score = health.score,
            severity = %health.severity,
            "analysis complete"
        );

        Ok(Analysis {
            snapshot,
            classification,
            lock,
            flags: input.flags,
            health,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        // Defaults are non-negative, so this cannot fail.
        Self {
            grace_secs: DEFAULT_GRACE_SECS,
            heavy_threshold_secs: DEFAULT_HEAVY_THRESHOLD_SECS as u64,
        }
    }
}
