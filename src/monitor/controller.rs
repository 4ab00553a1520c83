use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::MonitorConfig;
use crate::host::{HostContext, HostEvent};
use crate::models::{MetricReport, TimingEntry};

use super::worker::{monitor_loop, MonitorState};

/// Clonable handle to the measurement worker. All host signals funnel through
/// one channel, so the worker sees them in exactly the order they were sent.
#[derive(Clone)]
pub struct InteractionMonitor {
    events: UnboundedSender<HostEvent>,
    cancel_token: CancellationToken,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl InteractionMonitor {
    /// Spawn the measurement worker on the current tokio runtime.
    pub fn spawn(
        host: HostContext,
        config: MonitorConfig,
        sink: impl FnMut(MetricReport) + Send + 'static,
    ) -> Result<Self> {
        tokio::runtime::Handle::try_current()
            .context("interaction monitor requires a tokio runtime")?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();

        let state = MonitorState::new(host, config, Box::new(sink));
        let handle = tokio::spawn(monitor_loop(state, event_rx, cancel_token.clone()));

        Ok(Self {
            events: event_tx,
            cancel_token,
            worker: Arc::new(Mutex::new(Some(handle))),
        })
    }

    /// Forward a batch of observed timing fragments.
    pub fn deliver(&self, batch: Vec<TimingEntry>) -> Result<()> {
        self.send(HostEvent::Entries(batch))
    }

    /// The page became interactive; measurement starts.
    pub fn page_activated(&self) -> Result<()> {
        self.send(HostEvent::Activated)
    }

    /// The page was hidden; the current session's final report is due.
    pub fn page_hidden(&self) -> Result<()> {
        self.send(HostEvent::Hidden)
    }

    /// The page returned from the back/forward cache; a fresh session starts.
    pub fn page_restored(&self) -> Result<()> {
        self.send(HostEvent::Restored)
    }

    fn send(&self, event: HostEvent) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| anyhow!("measurement worker is gone"))
    }

    /// Stop the worker after it has applied everything already queued.
    pub async fn shutdown(&self) -> Result<()> {
        self.cancel_token.cancel();

        if let Some(handle) = self.worker.lock().await.take() {
            handle.await.context("monitor worker failed to join")?;
        }
        Ok(())
    }
}
