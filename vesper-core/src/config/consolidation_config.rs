use serde::{Deserialize, Serialize};

use super::defaults;

/// Consolidation pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Local wall-clock hour (0-23) at which the daily consolidation trigger fires.
    pub daily_trigger_hour: u32,
    /// Preference-pattern regex match threshold tags: prefer|like|want|favor.
    pub preference_pattern: String,
    /// Whether the scheduler also runs consolidation once, non-blocking, at startup.
    pub run_on_startup: bool,
    /// Minimum entities touched before the conflict detector scans an entity.
    pub conflict_scan_batch_size: usize,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            daily_trigger_hour: defaults::DEFAULT_CONSOLIDATION_HOUR,
            preference_pattern: r"(?i)\b(prefer|like|want|favor)\b".to_string(),
            run_on_startup: true,
            conflict_scan_batch_size: 64,
        }
    }
}
