//! The host-facing side of the monitor: the shared interaction counter, the
//! host capability snapshot, and the events the host forwards to the worker.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::models::TimingEntry;

/// Running total of distinct interactions the host has seen for the page.
/// Cloned handles share the same counter; the host records on its side and
/// the worker reads totals when computing the percentile rank.
#[derive(Debug, Clone, Default)]
pub struct InteractionCounter {
    total: Arc<AtomicU64>,
}

impl InteractionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_many(&self, count: u64) {
        self.total.fetch_add(count, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

/// What the host platform offers the monitor. When event timing is not
/// observable the monitor stays silent instead of failing.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub counter: InteractionCounter,
    /// Whether the host can observe event timings at all.
    pub event_timing: bool,
}

impl HostContext {
    pub fn new(counter: InteractionCounter) -> Self {
        Self {
            counter,
            event_timing: true,
        }
    }
}

/// Host signals delivered to the measurement worker, processed strictly in
/// arrival order.
#[derive(Debug)]
pub(crate) enum HostEvent {
    /// A batch of observed timing fragments.
    Entries(Vec<TimingEntry>),
    /// The page became interactive; measurement starts.
    Activated,
    /// The page was hidden; the session's final report is due.
    Hidden,
    /// The page came back from the back/forward cache; a new session starts.
    Restored,
}
