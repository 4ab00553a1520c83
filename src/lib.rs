//! Interaction-to-next-paint responsiveness monitoring for embedded page
//! sessions.
//!
//! The host feeds observed timing fragments and page lifecycle signals
//! through an [`InteractionMonitor`] handle. A worker task merges fragments
//! into interactions, keeps the ten longest, and estimates the session's
//! high-percentile latency, reporting to the host's sink whenever the
//! estimate changes and once more when the page is hidden. A page restored
//! from the back/forward cache starts a fresh measurement session.

pub mod config;
pub mod host;
mod interactions;
pub mod models;
pub mod monitor;
mod session;

pub use config::{MonitorConfig, DEFAULT_DURATION_THRESHOLD_MS};
pub use host::{HostContext, InteractionCounter};
pub use models::{EntryKind, MetricReport, NavigationKind, Rating, TimingEntry};
pub use monitor::{InteractionMonitor, ReportSink};
