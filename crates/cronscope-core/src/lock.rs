//! Lock and configuration inspection — independent of the event list,
//! merged with classifier output only at scoring time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lock expiry window in seconds. Matches the scheduler runtime's own
/// lock-expiry convention; changing one without the other breaks staleness
/// detection, so this is a constant rather than an option.
pub const LOCK_STALE_SECS: f64 = 60.0;

/// Metadata about the scheduler's run lock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    /// Epoch seconds (sub-second precision) the lock was taken, if a
    /// well-formed lock value exists.
    pub timestamp: Option<f64>,
    /// Identifier of the process holding the lock.
    pub owner: Option<String>,
    /// True iff a timestamp exists and is older than [`LOCK_STALE_SECS`].
    pub is_stale: bool,
}

/// Inspect a persisted lock value.
///
/// The expected shape is a two-element `[timestamp, owner]` array. Anything
/// else — absent, wrong arity, non-numeric timestamp — yields an inert
/// `LockInfo` (no timestamp, not stale) rather than an error.
pub fn inspect_lock(raw: Option<&Value>, now_high_res: f64) -> LockInfo {
    let pair = match raw.and_then(Value::as_array) {
        Some(items) if items.len() == 2 => items,
        _ => return LockInfo::default(),
    };

    let timestamp = match pair[0].as_f64() {
        Some(ts) => ts,
        None => return LockInfo::default(),
    };
    let owner = pair[1].as_str().map(str::to_string);

    LockInfo {
        timestamp: Some(timestamp),
        owner,
        is_stale: now_high_res - timestamp > LOCK_STALE_SECS,
    }
}

/// Boolean flags and trigger endpoint description read from process-wide
/// configuration, not from the scheduler table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFlags {
    #[serde(default)]
    pub scheduler_disabled: bool,
    #[serde(default)]
    pub alternate_mode_enabled: bool,
    #[serde(default)]
    pub trigger_url: String,
}

impl ConfigFlags {
    /// Read flags through a key lookup. Boolean coercion only — no
    /// validation, no caching; absent keys default to false / empty.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            scheduler_disabled: coerce_bool(get("scheduler_disabled").as_deref()),
            alternate_mode_enabled: coerce_bool(get("alternate_mode_enabled").as_deref()),
            trigger_url: get("trigger_url").unwrap_or_default(),
        }
    }
}

fn coerce_bool(raw: Option<&str>) -> bool {
    match raw {
        Some(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => false,
    }
}
