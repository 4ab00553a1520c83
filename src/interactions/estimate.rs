//! Percentile estimate over the tracked longest interactions.

use crate::interactions::longest::LongestInteractions;
use crate::models::Interaction;

const TARGET_PERCENTILE: u64 = 98;
/// One rank deeper into the sorted list per this many interactions. At the
/// 98th percentile that is one rank per fifty.
const INTERACTIONS_PER_RANK: u64 = 100 / (100 - TARGET_PERCENTILE);

/// The interaction whose latency is the session's high-percentile estimate,
/// or `None` when nothing has been tracked yet.
///
/// The candidate rank grows with the session's interaction count and is
/// clamped to the deepest tracked rank, so sessions with few interactions
/// simply report their worst one.
pub(crate) fn high_percentile_interaction(
    longest: &LongestInteractions,
    interactions_since_baseline: u64,
) -> Option<&Interaction> {
    if longest.is_empty() {
        return None;
    }

    let rank = (interactions_since_baseline / INTERACTIONS_PER_RANK) as usize;
    longest.get(rank.min(longest.len() - 1))
}
