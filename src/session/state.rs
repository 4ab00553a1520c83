//! Per-session measurement state: the tracked interactions, the interaction
//! baseline, and the current metric value.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::interactions::estimate::high_percentile_interaction;
use crate::interactions::longest::LongestInteractions;
use crate::interactions::merge::absorb_batch;
use crate::models::{NavigationKind, TimingEntry};

/// The metric value and its backing fragments. `value_ms` stays `None` until
/// the first estimate lands or the session is zero-filled at the end.
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricState {
    pub(crate) value_ms: Option<u64>,
    pub(crate) entries: Vec<TimingEntry>,
}

/// Everything measured for one continuous page presentation. Replaced
/// wholesale when the page is restored from the back/forward cache.
pub(crate) struct MeasurementSession {
    pub(crate) id: String,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) navigation: NavigationKind,
    longest: LongestInteractions,
    /// Host interaction total at session start. Interactions counted before
    /// this session began must not deepen the percentile rank.
    baseline_interaction_count: u64,
    pub(crate) metric: MetricState,
}

impl MeasurementSession {
    pub(crate) fn begin(navigation: NavigationKind, baseline_interaction_count: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            navigation,
            longest: LongestInteractions::new(),
            baseline_interaction_count,
            metric: MetricState::default(),
        }
    }

    pub(crate) fn interactions_since_baseline(&self, host_total: u64) -> u64 {
        host_total.saturating_sub(self.baseline_interaction_count)
    }

    /// Absorb a batch of fragments and refresh the metric from the new
    /// percentile candidate. The metric only moves when the candidate's
    /// latency differs from the current value.
    pub(crate) fn ingest(&mut self, batch: Vec<TimingEntry>, host_total: u64) {
        absorb_batch(&mut self.longest, batch);

        let count = self.interactions_since_baseline(host_total);
        if let Some(candidate) = high_percentile_interaction(&self.longest, count) {
            if self.metric.value_ms != Some(candidate.latency_ms) {
                self.metric.value_ms = Some(candidate.latency_ms);
                self.metric.entries = candidate.entries.clone();
            }
        }
    }

    /// End-of-session rule: interactions happened but none produced a
    /// measurable value, so report a hard zero with no backing fragments.
    pub(crate) fn zero_fill_if_uncaptured(&mut self, host_total: u64) {
        if self.metric.value_ms.is_none() && self.interactions_since_baseline(host_total) > 0 {
            self.metric.value_ms = Some(0);
            self.metric.entries = Vec::new();
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_len(&self) -> usize {
        self.longest.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_subtracted_from_the_host_total() {
        let session = MeasurementSession::begin(NavigationKind::BackForwardCache, 40);
        assert_eq!(session.interactions_since_baseline(100), 60);
        // A stale total from before the baseline never goes negative.
        assert_eq!(session.interactions_since_baseline(10), 0);
    }

    #[test]
    fn ingest_sets_the_metric_from_the_worst_interaction() {
        let mut session = MeasurementSession::begin(NavigationKind::Navigate, 0);
        session.ingest(
            vec![
                TimingEntry::event(1, "pointerup", 100, 250),
                TimingEntry::event(2, "keyup", 400, 90),
            ],
            2,
        );

        assert_eq!(session.metric.value_ms, Some(250));
        assert_eq!(session.metric.entries.len(), 1);
        assert_eq!(session.tracked_len(), 2);
    }

    #[test]
    fn unchanged_candidate_leaves_metric_entries_alone() {
        let mut session = MeasurementSession::begin(NavigationKind::Navigate, 0);
        session.ingest(vec![TimingEntry::event(1, "pointerup", 100, 250)], 1);
        // Same latency from a different interaction; value and entries stay.
        session.ingest(vec![TimingEntry::event(2, "keyup", 400, 250)], 2);

        assert_eq!(session.metric.value_ms, Some(250));
        assert_eq!(session.metric.entries[0].interaction_id, Some(1));
    }

    #[test]
    fn zero_fill_applies_only_to_uncaptured_sessions() {
        let mut session = MeasurementSession::begin(NavigationKind::Navigate, 0);
        session.zero_fill_if_uncaptured(3);
        assert_eq!(session.metric.value_ms, Some(0));
        assert!(session.metric.entries.is_empty());

        let mut idle = MeasurementSession::begin(NavigationKind::Navigate, 0);
        idle.zero_fill_if_uncaptured(0);
        assert_eq!(idle.metric.value_ms, None);

        let mut captured = MeasurementSession::begin(NavigationKind::Navigate, 0);
        captured.ingest(vec![TimingEntry::event(1, "pointerup", 100, 250)], 1);
        captured.zero_fill_if_uncaptured(5);
        assert_eq!(captured.metric.value_ms, Some(250));
    }
}
