use serde::{Deserialize, Serialize};

use super::defaults;

/// Skill Library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Co-occurrence count required before a relational vector is materialized.
    pub cooccurrence_threshold: u32,
    /// Maximum triggers retained per skill.
    pub max_triggers: usize,
    /// Approximate token budget for a skill summary (lazy-load injection size).
    pub summary_token_budget: usize,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            cooccurrence_threshold: defaults::DEFAULT_SKILL_COOCCURRENCE_THRESHOLD,
            max_triggers: defaults::DEFAULT_MAX_SKILL_TRIGGERS,
            summary_token_budget: defaults::DEFAULT_SUMMARY_TOKEN_BUDGET,
        }
    }
}
