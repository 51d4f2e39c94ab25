// End-to-end pipeline runs over realistic state dumps, plus the JSON shape
// the presentation layer consumes. Consumers render these structures
// directly, so field names and nesting must stay stable.

use cronscope_core::{
    Analyzer, AnalyzerOptions, AnalysisInput, Clock, ConfigFlags, RecurrenceRegistry, Severity,
    StaticHookRegistry,
};
use serde_json::json;

fn recurrences() -> RecurrenceRegistry {
    let mut reg = RecurrenceRegistry::new();
    reg.insert("every_minute", 60);
    reg.insert("hourly", 3_600);
    reg.insert("daily", 86_400);
    reg
}

#[test]
fn healthy_site_full_pipeline() {
    let raw = json!({
        "2000": { "rotate_logs": [ { "schedule": "daily", "args": [] } ] },
        "2100": { "send_digest": [ { "schedule": "hourly", "args": ["weekly"] } ] }
    });
    let hooks = StaticHookRegistry::from_names(["rotate_logs", "send_digest"]);

    let analysis = Analyzer::default()
        .analyze(AnalysisInput {
            raw_events: &raw,
            recurrences: &recurrences(),
            hooks: &hooks,
            raw_lock: None,
            flags: ConfigFlags::default(),
            clock: Clock::fixed(1_990),
        })
        .unwrap();

    assert_eq!(analysis.snapshot.total, 2);
    assert!(analysis.classification.overdue.is_empty());
    assert!(analysis.classification.heavy.is_empty());
    assert!(analysis.classification.orphaned.is_empty());
    assert_eq!(analysis.health.score, 100);
    assert_eq!(analysis.health.severity, Severity::Good);
}

#[test]
fn troubled_site_accumulates_every_finding() {
    // Two overdue one-shots, a heavy every_minute hook, and an orphan.
    let raw = json!({
        "100": { "old_plugin_task": [ { "args": [] } ] },
        "500": { "flush_cache": [ { "args": [] } ] },
        "1500": { "cleanup": {
            "a1": { "schedule": "every_minute", "args": [] },
            "a2": { "schedule": "every_minute", "args": [] }
        } }
    });
    let hooks = StaticHookRegistry::from_names(["flush_cache", "cleanup"]);

    let analysis = Analyzer::default()
        .analyze(AnalysisInput {
            raw_events: &raw,
            recurrences: &recurrences(),
            hooks: &hooks,
            raw_lock: Some(&json!([800.0, "runner-2"])),
            flags: ConfigFlags::default(),
            clock: Clock::fixed(1_000),
        })
        .unwrap();

    // overdue: 100 (age 900) then 500 (age 500); 1500 is in the future
    assert_eq!(analysis.classification.overdue.len(), 2);
    assert_eq!(analysis.classification.overdue[0].age, 900);
    assert_eq!(analysis.classification.overdue[1].age, 500);

    let cleanup = &analysis.classification.heavy["cleanup"];
    assert_eq!(cleanup.interval, 60);
    assert_eq!(cleanup.examples.len(), 2);

    assert_eq!(analysis.classification.orphaned, vec!["old_plugin_task"]);
    assert!(analysis
        .health
        .messages
        .contains(&"1 cron hook with no callbacks attached.".to_string()));

    // lock taken at 800.0, evaluated at 1000.0 — well past the 60s window
    assert!(analysis.lock.is_stale);
    assert_eq!(analysis.lock.owner.as_deref(), Some("runner-2"));

    // deductions: overdue 4 + heavy 2 + orphaned 1 = 7
    assert_eq!(analysis.health.score, 93);
}

#[test]
fn disabled_scheduler_scenario_scores_warning() {
    let raw = json!({
        "2000": { "a": [ {} ] }, "2001": { "b": [ {} ] }, "2002": { "c": [ {} ] },
        "2003": { "d": [ {} ] }, "2004": { "e": [ {} ] }, "2005": { "f": [ {} ] },
        "2006": { "g": [ {} ] }, "2007": { "h": [ {} ] }, "2008": { "i": [ {} ] },
        "2009": { "j": [ {} ] }
    });
    let hooks = StaticHookRegistry::from_names(["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    let flags = ConfigFlags {
        scheduler_disabled: true,
        ..Default::default()
    };

    let analysis = Analyzer::default()
        .analyze(AnalysisInput {
            raw_events: &raw,
            recurrences: &recurrences(),
            hooks: &hooks,
            raw_lock: None,
            flags,
            clock: Clock::fixed(1_000),
        })
        .unwrap();

    assert_eq!(analysis.snapshot.total, 10);
    assert_eq!(analysis.health.score, 50);
    assert_eq!(analysis.health.severity, Severity::Warning);
}

#[test]
fn empty_dump_reports_no_events_note() {
    let hooks = StaticHookRegistry::new();
    let analysis = Analyzer::default()
        .analyze(AnalysisInput {
            raw_events: &json!(null),
            recurrences: &RecurrenceRegistry::new(),
            hooks: &hooks,
            raw_lock: None,
            flags: ConfigFlags::default(),
            clock: Clock::fixed(1_000),
        })
        .unwrap();

    assert_eq!(analysis.snapshot.total, 0);
    assert_eq!(analysis.health.score, 100);
    assert!(analysis
        .health
        .messages
        .iter()
        .any(|m| m.contains("No events are currently scheduled")));
}

#[test]
fn custom_thresholds_change_classification_only() {
    let raw = json!({
        "900": { "h": [ { "schedule": "hourly", "args": [] } ] }
    });
    let hooks = StaticHookRegistry::from_names(["h"]);

    // With a 3600s heavy threshold the hourly hook counts as heavy, and a
    // zero grace makes the 900 event overdue at now=1000.
    let analyzer = Analyzer::new(AnalyzerOptions {
        grace_secs: 0,
        heavy_threshold_secs: 3_600,
    })
    .unwrap();

    let analysis = analyzer
        .analyze(AnalysisInput {
            raw_events: &raw,
            recurrences: &recurrences(),
            hooks: &hooks,
            raw_lock: None,
            flags: ConfigFlags::default(),
            clock: Clock::fixed(1_000),
        })
        .unwrap();

    assert_eq!(analysis.classification.overdue.len(), 1);
    assert!(analysis.classification.heavy.contains_key("h"));
}

#[test]
fn analysis_json_shape_is_stable() {
    let raw = json!({
        "100": { "old_task": [ { "schedule": "every_minute", "args": [1] } ] }
    });
    let hooks = StaticHookRegistry::new();

    let analysis = Analyzer::default()
        .analyze(AnalysisInput {
            raw_events: &raw,
            recurrences: &recurrences(),
            hooks: &hooks,
            raw_lock: Some(&json!([90.0, "w1"])),
            flags: ConfigFlags {
                scheduler_disabled: false,
                alternate_mode_enabled: true,
                trigger_url: "https://example.test/cron".into(),
            },
            clock: Clock::fixed(1_000),
        })
        .unwrap();

    let value = serde_json::to_value(&analysis).unwrap();

    // snapshot
    assert_eq!(value["snapshot"]["total"], 1);
    assert_eq!(value["snapshot"]["now"], 1_000);
    assert_eq!(value["snapshot"]["counts"]["old_task"], 1);
    assert_eq!(value["snapshot"]["events"][0]["hook"], "old_task");
    assert_eq!(value["snapshot"]["events"][0]["interval"], 60);

    // classification — overdue events carry flattened event fields + age
    assert_eq!(value["classification"]["overdue"][0]["hook"], "old_task");
    assert_eq!(value["classification"]["overdue"][0]["age"], 900);
    assert_eq!(
        value["classification"]["heavy"]["old_task"]["interval"],
        60
    );
    assert_eq!(value["classification"]["orphaned"][0], "old_task");

    // lock + flags
    assert_eq!(value["lock"]["owner"], "w1");
    assert_eq!(value["lock"]["is_stale"], true);
    assert_eq!(value["flags"]["alternate_mode_enabled"], true);
    assert_eq!(value["flags"]["trigger_url"], "https://example.test/cron");

    // health
    assert_eq!(value["health"]["severity"], "good");
    assert_eq!(value["health"]["counts"]["orphaned"], 1);
    assert!(value["health"]["messages"].as_array().unwrap().len() >= 2);
}
