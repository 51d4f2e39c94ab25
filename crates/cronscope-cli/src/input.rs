//! State-dump file schema. One JSON document carries everything the engine
//! reads: the raw event table, the recurrence registry, the registered
//! hooks, the lock value, and the scheduler's config flags.

use std::collections::BTreeMap;
use std::io::Read;

use anyhow::Context;
use serde::Deserialize;

use cronscope_core::{ConfigFlags, RecurrenceRegistry, StaticHookRegistry};

/// Registered hooks appear either as a plain list of names or as a
/// name → callback-count map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HookDump {
    Names(Vec<String>),
    Counts(BTreeMap<String, usize>),
}

impl Default for HookDump {
    fn default() -> Self {
        HookDump::Names(Vec::new())
    }
}

/// A full scheduler state dump, as exported by the host application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateDump {
    /// Raw table: timestamp → hook → instances. Kept as loose JSON so a
    /// malformed table degrades inside the engine instead of failing here.
    #[serde(default)]
    pub events: serde_json::Value,
    #[serde(default)]
    pub schedules: RecurrenceRegistry,
    #[serde(default)]
    pub hooks: HookDump,
    #[serde(default)]
    pub lock: Option<serde_json::Value>,
    #[serde(default)]
    pub scheduler_disabled: bool,
    #[serde(default)]
    pub alternate_mode_enabled: bool,
    #[serde(default)]
    pub trigger_url: String,
}

impl StateDump {
    /// Read a dump from a file path, or stdin when `path` is "-".
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let raw = if path == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading state dump from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("reading state dump from {path}"))?
        };
        serde_json::from_str(&raw).with_context(|| format!("parsing state dump from {path}"))
    }

    pub fn hook_registry(&self) -> StaticHookRegistry {
        match &self.hooks {
            HookDump::Names(names) => StaticHookRegistry::from_names(names.iter().cloned()),
            HookDump::Counts(counts) => StaticHookRegistry::from_counts(counts.clone()),
        }
    }

    pub fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            scheduler_disabled: self.scheduler_disabled,
            alternate_mode_enabled: self.alternate_mode_enabled,
            trigger_url: self.trigger_url.clone(),
        }
    }
}
