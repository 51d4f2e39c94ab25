use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One flattened entry from the scheduler's persisted event table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// UTC epoch seconds the event was scheduled to fire.
    pub timestamp: i64,
    /// Identifier naming the unit of work. Multiple callbacks may be bound
    /// to one hook.
    pub hook: String,
    /// Opaque values forwarded to the callback when the event fires.
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
    /// Named recurrence definition, `None` for a one-shot event.
    #[serde(default)]
    pub schedule: Option<String>,
    /// Seconds between recurrences, resolved from the recurrence registry
    /// at snapshot-build time. `None` when the schedule name is empty or
    /// unrecognized.
    #[serde(default)]
    pub interval: Option<u64>,
}

/// The flattened view of the raw event table, built fresh on every analysis
/// run. Never cached across calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Events in raw-table iteration order. The builder neither assumes nor
    /// enforces timestamp ordering.
    pub events: Vec<ScheduledEvent>,
    /// Occurrence count per hook name.
    pub counts: BTreeMap<String, usize>,
    /// Total event count.
    pub total: usize,
    /// Evaluation-time UTC epoch seconds, captured once per run so every
    /// comparison in the pipeline is internally consistent.
    pub now: i64,
}

/// A named recurrence definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    /// Seconds between recurrences.
    pub interval: u64,
}

/// Mapping from schedule name to its recurrence definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecurrenceRegistry(BTreeMap<String, Recurrence>);

impl RecurrenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, interval_secs: u64) {
        self.0.insert(
            name.into(),
            Recurrence {
                interval: interval_secs,
            },
        );
    }

    /// Look up the interval for a schedule name. `None` when unrecognized.
    pub fn resolve(&self, name: &str) -> Option<u64> {
        self.0.get(name).map(|r| r.interval)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Error type surfaced by a [`HookRegistry`] lookup. The engine cannot
/// reason about registry internals, so failures are carried opaquely and
/// propagated unchanged.
pub type RegistryError = Box<dyn std::error::Error + Send + Sync>;

/// The live callback registry, answering "how many callbacks are bound to
/// hook H?". Supplied by the host; the engine only reads it.
pub trait HookRegistry {
    fn callbacks_for(&self, hook: &str) -> std::result::Result<usize, RegistryError>;
}

/// Fixed name → callback-count table. Used by the CLI harness (which reads
/// the registry from a state dump) and by tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticHookRegistry {
    counts: BTreeMap<String, usize>,
}

impl StaticHookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        Self { counts }
    }

    /// Build from a list of registered hook names, one callback each.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = BTreeMap::new();
        for name in names {
            *counts.entry(name.into()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Register one more callback against `hook`.
    pub fn register(&mut self, hook: impl Into<String>) {
        *self.counts.entry(hook.into()).or_insert(0) += 1;
    }
}

impl HookRegistry for StaticHookRegistry {
    fn callbacks_for(&self, hook: &str) -> std::result::Result<usize, RegistryError> {
        Ok(self.counts.get(hook).copied().unwrap_or(0))
    }
}
