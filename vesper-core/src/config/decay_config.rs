use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Temporal decay and pruning configuration for the semantic tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Per-relation-type half-life overrides (days). Key is `relation_type`.
    pub half_life_overrides: HashMap<String, f64>,
    /// Default half-life in days (`exp(-Δdays/half_life)`).
    pub half_life_days: f64,
    /// Strength bump applied on reinforcement (new evidence).
    pub reinforcement_bump: f64,
    /// Strength bump applied when reinforcing relationships extracted from a
    /// `store_decision` conversation  — higher than
    /// `reinforcement_bump` so decisions decay slower than ordinary recall.
    pub decision_reinforcement_strength: f64,
    /// Minimum strength below which a relationship becomes a pruning candidate.
    pub prune_strength_threshold: f64,
    /// Access-count floor below which a relationship becomes a pruning candidate.
    pub prune_access_count_threshold: u64,
    /// Minimum age, in days, before pruning applies.
    pub prune_age_days: i64,
    /// Confidence ceiling applied to both facts in a detected conflict.
    pub conflict_confidence_ceiling: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            half_life_overrides: HashMap::new(),
            half_life_days: defaults::DEFAULT_HALF_LIFE_DAYS,
            reinforcement_bump: defaults::DEFAULT_REINFORCEMENT_BUMP,
            decision_reinforcement_strength: defaults::DEFAULT_DECISION_REINFORCEMENT_STRENGTH,
            prune_strength_threshold: defaults::DEFAULT_PRUNE_STRENGTH_THRESHOLD,
            prune_access_count_threshold: defaults::DEFAULT_PRUNE_ACCESS_COUNT_THRESHOLD,
            prune_age_days: defaults::DEFAULT_PRUNE_AGE_DAYS,
            conflict_confidence_ceiling: 0.5,
        }
    }
}
