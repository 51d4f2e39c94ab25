use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use cronscope_core::{AnalysisInput, Analyzer, AnalyzerOptions, Clock, Severity};

mod config;
mod input;
mod render;

use config::CliConfig;
use input::StateDump;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Inspect a scheduler state dump and report cron health.
#[derive(Debug, Parser)]
#[command(name = "cronscope", version)]
struct Cli {
    /// Path to the JSON state dump ("-" for stdin).
    #[arg(short, long)]
    input: String,

    /// Fixed evaluation time (UTC epoch seconds). Defaults to the system
    /// clock; fix it for reproducible runs.
    #[arg(long)]
    now: Option<i64>,

    /// Grace period in seconds before a past-due event counts as overdue.
    #[arg(long)]
    grace: Option<i64>,

    /// Intervals at or below this many seconds count as heavy-repeating.
    #[arg(long)]
    heavy_threshold: Option<i64>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file path (defaults to ./cronscope.toml; CRONSCOPE_* env
    /// vars override the file).
    #[arg(long)]
    config: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cronscope=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = CliConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!("config load failed ({e}), using defaults");
        CliConfig::default()
    });

    let analyzer = Analyzer::new(AnalyzerOptions {
        grace_secs: cli.grace.unwrap_or(cfg.grace_secs),
        heavy_threshold_secs: cli.heavy_threshold.unwrap_or(cfg.heavy_threshold_secs),
    })?;

    let dump = StateDump::load(&cli.input)?;
    let hooks = dump.hook_registry();
    let clock = match cli.now {
        Some(epoch) => Clock::fixed(epoch),
        None => Clock::system(),
    };
    info!(input = %cli.input, now = clock.epoch_secs, "running analysis");

    let analysis = analyzer.analyze(AnalysisInput {
        raw_events: &dump.events,
        recurrences: &dump.schedules,
        hooks: &hooks,
        raw_lock: dump.lock.as_ref(),
        flags: dump.flags(),
        clock,
    })?;

    let format = cli.format.unwrap_or_else(|| {
        if cfg.format.eq_ignore_ascii_case("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    });
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Text => print!("{}", render::render_text(&analysis)),
    }

    // Diagnostic-tool exit convention: 0 good, 1 warning, 2 critical.
    std::process::exit(match analysis.health.severity {
        Severity::Good => 0,
        Severity::Warning => 1,
        Severity::Critical => 2,
    });
}
