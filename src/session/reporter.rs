//! Change gate between the metric state and the host's report sink.

use chrono::Utc;

use crate::models::{MetricReport, Rating, METRIC_NAME};
use crate::session::state::MeasurementSession;

/// Suppresses reports whose value matches the last one delivered. A fresh
/// gate is bound to every session so restored pages start reporting from
/// scratch.
pub(crate) struct ReportGate {
    last_reported_ms: Option<u64>,
    report_all_changes: bool,
}

impl ReportGate {
    pub(crate) fn new(report_all_changes: bool) -> Self {
        Self {
            last_reported_ms: None,
            report_all_changes,
        }
    }

    /// Build a report for the session's current value, or `None` when the
    /// value is unset or unchanged. `force` bypasses the change check for
    /// the final report at session end.
    pub(crate) fn evaluate(
        &mut self,
        session: &MeasurementSession,
        force: bool,
    ) -> Option<MetricReport> {
        let value_ms = session.metric.value_ms?;

        let changed = self.last_reported_ms != Some(value_ms);
        if !force && !self.report_all_changes && !changed {
            return None;
        }

        let previous_ms = self.last_reported_ms.unwrap_or(0);
        let delta_ms = to_signed_ms(value_ms) - to_signed_ms(previous_ms);
        self.last_reported_ms = Some(value_ms);

        Some(MetricReport {
            id: session.id.clone(),
            name: METRIC_NAME.to_string(),
            value_ms,
            delta_ms,
            rating: Rating::from_value_ms(value_ms),
            entries: session.metric.entries.clone(),
            navigation: session.navigation,
            is_final: force,
            reported_at: Utc::now(),
        })
    }
}

fn to_signed_ms(value_ms: u64) -> i64 {
    i64::try_from(value_ms).unwrap_or(i64::MAX)
}
