use crate::models::TimingEntry;

/// A logical user interaction, merged from one or more timing fragments.
#[derive(Debug, Clone)]
pub struct Interaction {
    /// Host identity; `None` for the interaction built from legacy
    /// first-input fragments, which carry no id.
    pub id: Option<u64>,
    /// Longest duration observed across the merged fragments. Only ever
    /// raised, never lowered.
    pub latency_ms: u64,
    /// Contributing fragments in arrival order.
    pub entries: Vec<TimingEntry>,
}

impl Interaction {
    pub(crate) fn from_entry(entry: TimingEntry) -> Self {
        Self {
            id: entry.interaction_id,
            latency_ms: entry.duration_ms,
            entries: vec![entry],
        }
    }

    /// Fold another fragment of the same interaction into this record.
    pub(crate) fn absorb(&mut self, entry: TimingEntry) {
        self.latency_ms = self.latency_ms.max(entry.duration_ms);
        self.entries.push(entry);
    }
}
