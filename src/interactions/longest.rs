//! Bounded tracker for the longest interactions of a measurement session.

use std::collections::HashMap;

use crate::models::{Interaction, TimingEntry};

/// How many of the longest interactions are kept per session. The percentile
/// estimate only ever reads the first ten ranks, so anything beyond that is
/// dead weight.
pub(crate) const MAX_TRACKED_INTERACTIONS: usize = 10;

/// The session's longest interactions, sorted by latency descending, with a
/// lookup index from interaction id to list position.
///
/// The index key is the optional host id: all identity-less first-input
/// fragments collapse into a single record under `None`.
pub(crate) struct LongestInteractions {
    list: Vec<Interaction>,
    index: HashMap<Option<u64>, usize>,
}

impl LongestInteractions {
    pub(crate) fn new() -> Self {
        Self {
            list: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Interaction at the given rank (0 = longest).
    pub(crate) fn get(&self, rank: usize) -> Option<&Interaction> {
        self.list.get(rank)
    }

    /// Latency of the shortest tracked interaction, the bar a new candidate
    /// has to clear once the list is full.
    pub(crate) fn min_latency_ms(&self) -> u64 {
        self.list.last().map(|i| i.latency_ms).unwrap_or(0)
    }

    pub(crate) fn is_tracked(&self, id: Option<u64>) -> bool {
        self.index.contains_key(&id)
    }

    /// Whether any tracked fragment has exactly this duration and start time.
    /// Used to drop first-input fragments that duplicate an already-observed
    /// event-timing fragment.
    pub(crate) fn has_matching_fragment(&self, duration_ms: u64, start_time_ms: u64) -> bool {
        self.list.iter().any(|interaction| {
            interaction
                .entries
                .iter()
                .any(|e| e.duration_ms == duration_ms && e.start_time_ms == start_time_ms)
        })
    }

    /// Admit a fragment: merge it into its interaction if one is tracked,
    /// otherwise start a new record, then re-sort and trim back to capacity.
    ///
    /// Fragments that belong to an untracked interaction and do not beat the
    /// shortest tracked latency are skipped without touching the list.
    pub(crate) fn consider(&mut self, entry: TimingEntry) {
        let tracked = self.is_tracked(entry.interaction_id);

        if !tracked
            && self.list.len() >= MAX_TRACKED_INTERACTIONS
            && entry.duration_ms <= self.min_latency_ms()
        {
            return;
        }

        match self.index.get(&entry.interaction_id) {
            Some(&position) => self.list[position].absorb(entry),
            None => self.list.push(Interaction::from_entry(entry)),
        }

        self.list.sort_by(|a, b| b.latency_ms.cmp(&a.latency_ms));
        self.list.truncate(MAX_TRACKED_INTERACTIONS);

        // Positions moved; rebuild the index to match.
        self.index.clear();
        for (position, interaction) in self.list.iter().enumerate() {
            self.index.insert(interaction.id, position);
        }
    }
}
