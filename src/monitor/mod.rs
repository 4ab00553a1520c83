pub mod controller;
mod worker;

use crate::models::MetricReport;

/// Callback receiving metric reports as the worker produces them.
pub type ReportSink = Box<dyn FnMut(MetricReport) + Send>;

pub use controller::InteractionMonitor;
