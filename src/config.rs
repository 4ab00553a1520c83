use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Event timings shorter than this are not delivered to the pipeline.
/// First-input timings bypass the threshold entirely.
pub const DEFAULT_DURATION_THRESHOLD_MS: u64 = 40;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitorConfig {
    /// Minimum duration for an event timing to reach the pipeline. Filters
    /// delivery only; the host's interaction counter is unaffected.
    pub duration_threshold_ms: u64,
    /// Report on every batch that produces a value, not just on changes.
    pub report_all_changes: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            duration_threshold_ms: DEFAULT_DURATION_THRESHOLD_MS,
            report_all_changes: false,
        }
    }
}

impl MonitorConfig {
    /// Load from a JSON file, falling back to defaults when the file does
    /// not exist.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read monitor config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse monitor config in {}", path.display()))
    }
}
