//! Snapshot builder — flattens the raw scheduler table into a uniform
//! event list plus per-hook occurrence counts.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{RecurrenceRegistry, ScheduledEvent, Snapshot};

/// Flatten the raw table (timestamp → hook → instances) into a [`Snapshot`].
///
/// `raw` is kept as loose JSON so a malformed or missing table degrades to
/// an empty snapshot instead of a deserialization failure. `now` is supplied
/// by the caller — the builder never reads a clock, so the whole pipeline is
/// deterministic under a fixed clock.
pub fn build_snapshot(raw: &Value, recurrences: &RecurrenceRegistry, now: i64) -> Snapshot {
    let mut events: Vec<ScheduledEvent> = Vec::new();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    let table = match raw.as_object() {
        Some(table) => table,
        None => {
            if !raw.is_null() {
                warn!("raw event table is not a mapping — treating as empty");
            }
            return Snapshot {
                events,
                counts,
                total: 0,
                now,
            };
        }
    };

    for (ts_key, hook_map) in table {
        let timestamp = match ts_key.parse::<i64>() {
            Ok(ts) => ts,
            Err(_) => {
                debug!(key = %ts_key, "skipping non-numeric timestamp key");
                continue;
            }
        };

        let hook_map = match hook_map.as_object() {
            Some(m) => m,
            None => {
                debug!(timestamp, "skipping malformed hook map");
                continue;
            }
        };

        for (hook, instances) in hook_map {
            for instance in iter_instances(instances) {
                let schedule = instance
                    .get("schedule")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);
                // Unrecognized schedule names resolve to None, never an error.
                let interval = schedule.as_deref().and_then(|s| recurrences.resolve(s));
                let args = instance
                    .get("args")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();

                *counts.entry(hook.clone()).or_insert(0) += 1;
                events.push(ScheduledEvent {
                    timestamp,
                    hook: hook.clone(),
                    args,
                    schedule,
                    interval,
                });
            }
        }
    }

    let total = events.len();
    Snapshot {
        events,
        counts,
        total,
        now,
    }
}

/// Instances appear either as an array of instance objects or as an object
/// keyed by args fingerprint — both shapes occur in persisted tables.
/// Anything else yields no instances.
fn iter_instances(value: &Value) -> Vec<&serde_json::Map<String, Value>> {
    match value {
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        Value::Object(map) => map.values().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}
