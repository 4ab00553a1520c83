//! Raw timing fragments as delivered by the host's performance observer.

use serde::{Deserialize, Serialize};

/// Which host observation path produced a timing entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    /// Identity-bearing event-timing entry.
    Event,
    /// Legacy first-input entry; carries no interaction identity.
    FirstInput,
}

/// A single timing fragment observed by the host. One logical interaction
/// (a tap, a keystroke run) usually produces several fragments sharing an
/// interaction id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimingEntry {
    /// Host-assigned identity of the logical interaction this fragment
    /// belongs to. `None` when the host did not attribute the fragment to
    /// an interaction (the platform's zero id, and all first-input
    /// fragments).
    pub interaction_id: Option<u64>,
    pub kind: EntryKind,
    /// Host event name ("pointerdown", "keydown", ...). Carried for
    /// attribution only; the pipeline never branches on it.
    pub name: String,
    pub start_time_ms: u64,
    pub duration_ms: u64,
}

impl TimingEntry {
    /// An identity-bearing event-timing fragment.
    pub fn event(
        interaction_id: u64,
        name: impl Into<String>,
        start_time_ms: u64,
        duration_ms: u64,
    ) -> Self {
        Self {
            interaction_id: Some(interaction_id),
            kind: EntryKind::Event,
            name: name.into(),
            start_time_ms,
            duration_ms,
        }
    }

    /// A legacy first-input fragment (no interaction identity).
    pub fn first_input(name: impl Into<String>, start_time_ms: u64, duration_ms: u64) -> Self {
        Self {
            interaction_id: None,
            kind: EntryKind::FirstInput,
            name: name.into(),
            start_time_ms,
            duration_ms,
        }
    }
}
