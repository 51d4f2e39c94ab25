//! `cronscope-core` — read-only inspection engine for a cooperative task
//! scheduler's persisted state.
//!
//! # Overview
//!
//! One analysis run is a pure, synchronous pipeline over caller-supplied
//! inputs. Data flows strictly one way; the lock/config inspection is an
//! independent input merged only at scoring time:
//!
//! | Stage    | Module       | Produces |
//! |----------|--------------|----------|
//! | Snapshot | [`snapshot`] | Flattened event list + per-hook counts |
//! | Classify | [`classify`] | Overdue events, heavy-repeating groups, orphaned hooks |
//! | Inspect  | [`lock`]     | Lock staleness + configuration flags |
//! | Score    | [`score`]    | 0–100 health score, severity tier, messages |
//!
//! The engine mutates nothing, caches nothing, and reads no clock of its
//! own — `now` is injected per run. Malformed input degrades to empty or
//! inert results; only invalid analyzer options and hook-registry failures
//! surface as errors.

pub mod analyzer;
pub mod classify;
pub mod error;
pub mod lock;
pub mod score;
pub mod snapshot;
pub mod types;

pub use analyzer::{
    Analysis, AnalysisInput, Analyzer, AnalyzerOptions, Clock, DEFAULT_GRACE_SECS,
    DEFAULT_HEAVY_THRESHOLD_SECS,
};
pub use classify::{classify, Classification, HeavyGroup, OverdueEvent, MAX_HEAVY_EXAMPLES};
pub use error::{CoreError, Result};
pub use lock::{inspect_lock, ConfigFlags, LockInfo, LOCK_STALE_SECS};
pub use score::{score, Counts, HealthReport, Severity};
pub use snapshot::build_snapshot;
pub use types::{
    HookRegistry, Recurrence, RecurrenceRegistry, RegistryError, ScheduledEvent, Snapshot,
    StaticHookRegistry,
};
