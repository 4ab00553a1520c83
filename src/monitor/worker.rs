use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use crate::config::MonitorConfig;
use crate::host::{HostContext, HostEvent};
use crate::models::{EntryKind, NavigationKind, TimingEntry};
use crate::session::reporter::ReportGate;
use crate::session::state::MeasurementSession;

use super::ReportSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MonitorPhase {
    /// Constructed but not yet activated; incoming timings are dropped.
    Idle,
    /// Page is interactive and fragments are being measured.
    Observing,
    /// Final report delivered. Timings keep flowing and change reports can
    /// still fire, but no second final report is produced.
    Finalized,
}

/// All measurement state, owned exclusively by the worker task. Events are
/// applied strictly in arrival order, so every report reflects a consistent
/// snapshot.
pub(crate) struct MonitorState {
    phase: MonitorPhase,
    config: MonitorConfig,
    host: HostContext,
    session: MeasurementSession,
    gate: ReportGate,
    sink: ReportSink,
}

impl MonitorState {
    pub(crate) fn new(host: HostContext, config: MonitorConfig, sink: ReportSink) -> Self {
        let gate = ReportGate::new(config.report_all_changes);
        Self {
            phase: MonitorPhase::Idle,
            config,
            host,
            session: MeasurementSession::begin(NavigationKind::Navigate, 0),
            gate,
            sink,
        }
    }

    pub(crate) fn handle_event(&mut self, event: HostEvent) {
        // Hosts without event timing get silence, not errors.
        if !self.host.event_timing {
            return;
        }

        match event {
            HostEvent::Activated => self.on_activated(),
            HostEvent::Entries(batch) => self.on_entries(batch),
            HostEvent::Hidden => self.on_hidden(),
            HostEvent::Restored => self.on_restored(),
        }
    }

    fn on_activated(&mut self) {
        match self.phase {
            MonitorPhase::Idle => {
                self.phase = MonitorPhase::Observing;
                info!("interaction monitoring active for session {}", self.session.id);
            }
            _ => warn!("duplicate activation ignored"),
        }
    }

    fn on_entries(&mut self, batch: Vec<TimingEntry>) {
        if self.phase == MonitorPhase::Idle {
            debug!("dropping {} timing fragments before activation", batch.len());
            return;
        }

        // First-input fragments always pass; event timings must meet the
        // configured duration threshold.
        let batch: Vec<TimingEntry> = batch
            .into_iter()
            .filter(|entry| {
                entry.kind == EntryKind::FirstInput
                    || entry.duration_ms >= self.config.duration_threshold_ms
            })
            .collect();
        if batch.is_empty() {
            return;
        }

        self.session.ingest(batch, self.host.counter.total());
        self.emit(false);
    }

    fn on_hidden(&mut self) {
        match self.phase {
            MonitorPhase::Idle => debug!("page hidden before activation; nothing to finalize"),
            MonitorPhase::Observing => {
                self.session
                    .zero_fill_if_uncaptured(self.host.counter.total());
                self.phase = MonitorPhase::Finalized;
                self.emit(true);

                let elapsed_secs = (chrono::Utc::now() - self.session.started_at).num_seconds();
                info!(
                    "session {} finalized after {}s",
                    self.session.id, elapsed_secs
                );
            }
            MonitorPhase::Finalized => warn!("page hidden again after final report; ignoring"),
        }
    }

    fn on_restored(&mut self) {
        if self.phase == MonitorPhase::Idle {
            debug!("cache restore before activation; ignoring");
            return;
        }

        // A restored page counts as a new presentation: fresh session id,
        // fresh tracker, interaction baseline moved to the current total,
        // and a reporter that has delivered nothing yet.
        self.session = MeasurementSession::begin(
            NavigationKind::BackForwardCache,
            self.host.counter.total(),
        );
        self.gate = ReportGate::new(self.config.report_all_changes);
        self.phase = MonitorPhase::Observing;
        info!(
            "restored from back/forward cache; new session {}",
            self.session.id
        );
    }

    fn emit(&mut self, force: bool) {
        if let Some(report) = self.gate.evaluate(&self.session, force) {
            (self.sink)(report);
        }
    }
}

pub(crate) async fn monitor_loop(
    mut state: MonitorState,
    mut events: UnboundedReceiver<HostEvent>,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(event) => state.handle_event(event),
                    None => break,
                }
            }
            _ = cancel_token.cancelled() => {
                // Apply anything already queued so a final report racing the
                // shutdown is not lost.
                while let Ok(event) = events.try_recv() {
                    state.handle_event(event);
                }
                info!("interaction monitor shutting down");
                break;
            }
        }
    }
}
