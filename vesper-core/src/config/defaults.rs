//! Named default values referenced by every config sub-struct's `Default` impl.

use crate::constants;

pub const DEFAULT_ARCHIVAL_THRESHOLD: f64 = 0.15;
pub const DEFAULT_DECAY_PROCESSING_INTERVAL_SECS: u64 = 86_400;
pub const DEFAULT_HALF_LIFE_DAYS: f64 = constants::DECAY_HALF_LIFE_DAYS;
pub const DEFAULT_REINFORCEMENT_BUMP: f64 = constants::REINFORCEMENT_BUMP;
pub const DEFAULT_DECISION_REINFORCEMENT_STRENGTH: f64 = constants::REINFORCEMENT_BUMP * 2.0;

pub const DEFAULT_PRUNE_STRENGTH_THRESHOLD: f64 = constants::PRUNE_STRENGTH_THRESHOLD;
pub const DEFAULT_PRUNE_ACCESS_COUNT_THRESHOLD: u64 = constants::PRUNE_ACCESS_COUNT_THRESHOLD;
pub const DEFAULT_PRUNE_AGE_DAYS: i64 = constants::PRUNE_AGE_DAYS;

pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;
pub const DEFAULT_NOVELTY_THRESHOLD: f64 = 0.3;
pub const DEFAULT_CONSOLIDATION_HOUR: u32 = constants::CONSOLIDATION_HOUR_UTC_LOCAL;

pub const DEFAULT_FAST_PATH_THRESHOLD: f64 = constants::ROUTER_FAST_PATH_THRESHOLD;
pub const DEFAULT_RRF_K: u32 = constants::RRF_K;
pub const DEFAULT_RETRIEVE_DEADLINE_MS: u64 = constants::RETRIEVE_DEADLINE_MS;

pub const DEFAULT_SKILL_COOCCURRENCE_THRESHOLD: u32 = constants::SKILL_COOCCURRENCE_THRESHOLD;
pub const DEFAULT_MAX_SKILL_TRIGGERS: usize = constants::MAX_SKILL_TRIGGERS;
pub const DEFAULT_SUMMARY_TOKEN_BUDGET: usize = 50;

pub const DEFAULT_EMBEDDING_DIM: usize = constants::EMBEDDING_DIM;
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_EMBEDDING_RETRIES: u32 = constants::EMBEDDING_RETRY_ATTEMPTS;

pub const DEFAULT_VECTOR_COLLECTION: &str = "vesper_memories";

pub const DEFAULT_WORKING_TIER_CAPACITY: usize = constants::WORKING_TIER_CAPACITY;
pub const DEFAULT_WORKING_TIER_TTL_SECS: u64 = constants::WORKING_TIER_TTL_SECS;

/// `$HOME/.vesper/`, falling back to `./`.vesper` if `$HOME` is unset.
pub fn default_data_root() -> std::path::PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    std::path::PathBuf::from(home).join(".vesper")
}
