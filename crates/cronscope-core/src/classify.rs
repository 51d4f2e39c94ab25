//! Event classifier — partitions a snapshot into overdue events,
//! heavy-repeating hook groups, and orphaned hook names.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::{HookRegistry, ScheduledEvent, Snapshot};

/// Cap on stored sample events per heavy-repeating hook. Enforced inside
/// the classifier so callers never need to truncate themselves.
pub const MAX_HEAVY_EXAMPLES: usize = 3;

/// An event past its grace window, annotated with how late it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverdueEvent {
    #[serde(flatten)]
    pub event: ScheduledEvent,
    /// Seconds past the scheduled time at evaluation (`now - timestamp`).
    pub age: i64,
}

/// All scheduled occurrences of one hook repeating at a heavy cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeavyGroup {
    pub hook: String,
    pub schedule: Option<String>,
    /// Resolved recurrence interval in seconds.
    pub interval: u64,
    /// Up to [`MAX_HEAVY_EXAMPLES`] sample events.
    pub examples: Vec<ScheduledEvent>,
}

/// Derived partition of a snapshot. Never mutates the snapshot itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    /// Most overdue first; ties keep source encounter order.
    pub overdue: Vec<OverdueEvent>,
    /// Heavy-repeating groups keyed by hook name.
    pub heavy: BTreeMap<String, HeavyGroup>,
    /// Hooks present in the snapshot with zero registered callbacks, in
    /// first-seen order.
    pub orphaned: Vec<String>,
}

/// Classify every event in `snapshot` against the live hook registry.
///
/// The registry is queried once per distinct hook, not once per event —
/// tables with many recurrences of the same hook stay cheap. A registry
/// query failure aborts classification and is propagated unchanged.
pub fn classify(
    snapshot: &Snapshot,
    registry: &dyn HookRegistry,
    grace_secs: i64,
    heavy_threshold_secs: u64,
) -> Result<Classification> {
    let mut overdue: Vec<OverdueEvent> = Vec::new();
    let mut heavy: BTreeMap<String, HeavyGroup> = BTreeMap::new();
    let mut orphaned: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for event in &snapshot.events {
        // Grace absorbs normal scheduling jitter — events queued for
        // near-term execution are not "late".
        if event.timestamp + grace_secs < snapshot.now {
            overdue.push(OverdueEvent {
                event: event.clone(),
                age: snapshot.now - event.timestamp,
            });
        }

        // One-shot events (interval unresolved) can never be heavy-repeating.
        if let Some(interval) = event.interval {
            if interval > 0 && interval <= heavy_threshold_secs {
                let group = heavy.entry(event.hook.clone()).or_insert_with(|| HeavyGroup {
                    hook: event.hook.clone(),
                    schedule: event.schedule.clone(),
                    interval,
                    examples: Vec::new(),
                });
                if group.examples.len() < MAX_HEAVY_EXAMPLES {
                    group.examples.push(event.clone());
                }
            }
        }

        if seen.insert(event.hook.as_str()) {
            match registry.callbacks_for(&event.hook) {
                Ok(0) => orphaned.push(event.hook.clone()),
                Ok(_) => {}
                Err(source) => {
                    return Err(CoreError::Registry {
                        hook: event.hook.clone(),
                        source,
                    })
                }
            }
        }
    }

    // Vec::sort_by is stable: equal ages keep encounter order, so re-running
    // on an unchanged snapshot yields identical ordering.
    overdue.sort_by(|a, b| b.age.cmp(&a.age));

    Ok(Classification {
        overdue,
        heavy,
        orphaned,
    })
}
