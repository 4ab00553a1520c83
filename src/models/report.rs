//! The metric report handed to the host when the responsiveness estimate
//! changes or the session ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::TimingEntry;

pub const METRIC_NAME: &str = "INP";

/// Estimates at or below this read as good responsiveness.
pub const GOOD_THRESHOLD_MS: u64 = 200;
/// Estimates above this read as poor responsiveness.
pub const POOR_THRESHOLD_MS: u64 = 500;

/// Qualitative bucket for a responsiveness value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
}

impl Rating {
    pub fn from_value_ms(value_ms: u64) -> Self {
        if value_ms <= GOOD_THRESHOLD_MS {
            Rating::Good
        } else if value_ms <= POOR_THRESHOLD_MS {
            Rating::NeedsImprovement
        } else {
            Rating::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::NeedsImprovement => "needs-improvement",
            Rating::Poor => "poor",
        }
    }
}

/// How the measured page session came to be active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationKind {
    /// Ordinary navigation; the first session of a page.
    Navigate,
    /// Session restored from the host's back/forward cache.
    BackForwardCache,
}

/// A snapshot of the responsiveness metric delivered to the host's sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricReport {
    /// Id of the measurement session this report belongs to. Changes when
    /// the page is restored from the back/forward cache.
    pub id: String,
    pub name: String,
    pub value_ms: u64,
    /// Change since the previous report of this session. Signed because the
    /// estimate can move to a shorter interaction as the count grows.
    pub delta_ms: i64,
    pub rating: Rating,
    /// Fragments of the interaction currently backing the value. Empty when
    /// the value was zero-filled at session end.
    pub entries: Vec<TimingEntry>,
    pub navigation: NavigationKind,
    /// Set on the report emitted when the page is hidden.
    pub is_final: bool,
    pub reported_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_thresholds() {
        assert_eq!(Rating::from_value_ms(0), Rating::Good);
        assert_eq!(Rating::from_value_ms(200), Rating::Good);
        assert_eq!(Rating::from_value_ms(201), Rating::NeedsImprovement);
        assert_eq!(Rating::from_value_ms(500), Rating::NeedsImprovement);
        assert_eq!(Rating::from_value_ms(501), Rating::Poor);
    }

    #[test]
    fn rating_serializes_kebab_case() {
        let json = serde_json::to_string(&Rating::NeedsImprovement).unwrap();
        assert_eq!(json, "\"needs-improvement\"");
        assert_eq!(Rating::NeedsImprovement.as_str(), "needs-improvement");
    }
}
