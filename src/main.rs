use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use log::{error, info};
use serde::Deserialize;

use nextpaint::{
    HostContext, InteractionCounter, InteractionMonitor, MetricReport, MonitorConfig, TimingEntry,
};

/// One step of a recorded page session, replayed against the monitor.
#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
enum TraceStep {
    Activate,
    Entries { entries: Vec<TimingEntry> },
    Interactions { count: u64 },
    Hidden,
    Restore,
}

fn load_trace(path: &str) -> Result<Vec<TraceStep>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace from {path}"))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse trace in {path}"))
}

/// A short synthetic session: a slow tap, some quick typing, a hide, and a
/// return from the back/forward cache.
fn builtin_trace() -> Vec<TraceStep> {
    vec![
        TraceStep::Activate,
        TraceStep::Interactions { count: 2 },
        TraceStep::Entries {
            entries: vec![
                TimingEntry::event(1, "pointerdown", 1200, 180),
                TimingEntry::event(1, "pointerup", 1260, 310),
                TimingEntry::event(2, "keydown", 2400, 60),
            ],
        },
        TraceStep::Interactions { count: 1 },
        TraceStep::Entries {
            entries: vec![TimingEntry::event(3, "keydown", 3000, 45)],
        },
        TraceStep::Hidden,
        TraceStep::Restore,
        TraceStep::Interactions { count: 1 },
        TraceStep::Entries {
            entries: vec![TimingEntry::event(4, "pointerup", 9000, 95)],
        },
        TraceStep::Hidden,
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let steps = match args.next() {
        Some(path) => load_trace(&path)?,
        None => builtin_trace(),
    };
    let config = match args.next() {
        Some(path) => MonitorConfig::from_json_file(path)?,
        None => MonitorConfig::default(),
    };

    info!("replaying {} trace steps", steps.len());

    let counter = InteractionCounter::new();
    let reports: Arc<Mutex<Vec<MetricReport>>> = Arc::new(Mutex::new(Vec::new()));
    let sink_reports = Arc::clone(&reports);

    let monitor = InteractionMonitor::spawn(
        HostContext::new(counter.clone()),
        config,
        move |report| {
            match serde_json::to_string(&report) {
                Ok(json) => info!("report: {json}"),
                Err(err) => error!("failed to serialize report: {err}"),
            }
            let mut guard = match sink_reports.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.push(report);
        },
    )?;

    for step in steps {
        match step {
            TraceStep::Activate => monitor.page_activated()?,
            TraceStep::Entries { entries } => monitor.deliver(entries)?,
            TraceStep::Interactions { count } => counter.record_many(count),
            TraceStep::Hidden => monitor.page_hidden()?,
            TraceStep::Restore => monitor.page_restored()?,
        }
    }

    monitor.shutdown().await?;

    let reports = match reports.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    info!("replay complete: {} report(s) delivered", reports.len());
    if let Some(last) = reports.last() {
        info!(
            "latest estimate {}ms ({}) for session {}",
            last.value_ms,
            last.rating.as_str(),
            last.id
        );
    }

    Ok(())
}
