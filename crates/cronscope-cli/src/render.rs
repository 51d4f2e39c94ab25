//! Human-readable report rendering. Truncation happens here, not in the
//! engine — the analysis always carries full lists.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use cronscope_core::Analysis;

/// Display cap for the overdue table. The engine result stays unsliced.
const MAX_OVERDUE_ROWS: usize = 50;

pub fn render_text(analysis: &Analysis) -> String {
    let health = &analysis.health;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Cron health: {}/100 ({})",
        health.score, health.severity
    );
    for msg in &health.messages {
        let _ = writeln!(out, "  - {msg}");
    }

    let counts = &health.counts;
    let _ = writeln!(
        out,
        "\nTotals: {} events, {} overdue, {} heavy hooks, {} orphaned hooks",
        counts.total, counts.overdue, counts.heavy, counts.orphaned
    );

    if !analysis.classification.overdue.is_empty() {
        let shown = analysis.classification.overdue.len().min(MAX_OVERDUE_ROWS);
        let _ = writeln!(out, "\nOverdue (most overdue first, showing {shown}):");
        for entry in analysis.classification.overdue.iter().take(MAX_OVERDUE_ROWS) {
            let _ = writeln!(
                out,
                "  {}  {}  (late by {}s)",
                format_timestamp(entry.event.timestamp),
                entry.event.hook,
                entry.age
            );
        }
    }

    if !analysis.classification.heavy.is_empty() {
        let _ = writeln!(out, "\nHeavy-repeating hooks:");
        for group in analysis.classification.heavy.values() {
            let occurrences = analysis
                .snapshot
                .counts
                .get(&group.hook)
                .copied()
                .unwrap_or(0);
            let _ = writeln!(
                out,
                "  {}  {} ({}s interval), {} occurrence{}",
                group.hook,
                group.schedule.as_deref().unwrap_or("?"),
                group.interval,
                occurrences,
                if occurrences == 1 { "" } else { "s" }
            );
        }
    }

    if !analysis.classification.orphaned.is_empty() {
        let _ = writeln!(out, "\nOrphaned hooks (scheduled, no callbacks):");
        for hook in &analysis.classification.orphaned {
            let _ = writeln!(out, "  {hook}");
        }
    }

    match analysis.lock.timestamp {
        Some(ts) => {
            let _ = writeln!(
                out,
                "\nLock: held by {} since {}{}",
                analysis.lock.owner.as_deref().unwrap_or("unknown"),
                format_timestamp(ts as i64),
                if analysis.lock.is_stale { " (stale)" } else { "" }
            );
        }
        None => {
            let _ = writeln!(out, "\nLock: not held");
        }
    }

    let flags = &analysis.flags;
    let _ = writeln!(
        out,
        "Scheduler disabled: {}; alternate mode: {}; trigger URL: {}",
        yes_no(flags.scheduler_disabled),
        yes_no(flags.alternate_mode_enabled),
        if flags.trigger_url.is_empty() {
            "(none)"
        } else {
            &flags.trigger_url
        }
    );

    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn format_timestamp(epoch: i64) -> String {
    match DateTime::<Utc>::from_timestamp(epoch, 0) {
        Some(dt) => dt.to_rfc3339(),
        None => epoch.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cronscope_core::{
        AnalysisInput, Analyzer, Clock, ConfigFlags, RecurrenceRegistry, StaticHookRegistry,
    };
    use serde_json::json;

    fn sample_analysis() -> Analysis {
        let raw = json!({
            "100": { "old_plugin_task": [ {} ] },
            "2000": { "cleanup": [ { "schedule": "every_minute", "args": [] } ] }
        });
        let mut schedules = RecurrenceRegistry::new();
        schedules.insert("every_minute", 60);
        let hooks = StaticHookRegistry::from_names(["cleanup"]);

        Analyzer::default()
            .analyze(AnalysisInput {
                raw_events: &raw,
                recurrences: &schedules,
                hooks: &hooks,
                raw_lock: Some(&json!([900.0, "runner-1"])),
                flags: ConfigFlags {
                    trigger_url: "https://example.test/cron".into(),
                    ..Default::default()
                },
                clock: Clock::fixed(1_000),
            })
            .unwrap()
    }

    #[test]
    fn text_report_covers_all_sections() {
        let text = render_text(&sample_analysis());

        assert!(text.starts_with("Cron health: "));
        assert!(text.contains("Overdue (most overdue first"));
        assert!(text.contains("old_plugin_task"));
        assert!(text.contains("Heavy-repeating hooks:"));
        assert!(text.contains("every_minute (60s interval)"));
        assert!(text.contains("Orphaned hooks"));
        assert!(text.contains("Lock: held by runner-1"));
        assert!(text.contains("(stale)"));
        assert!(text.contains("trigger URL: https://example.test/cron"));
    }

    #[test]
    fn timestamps_render_as_rfc3339() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn unrepresentable_timestamp_falls_back_to_raw() {
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }
}
