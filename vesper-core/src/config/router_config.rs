use serde::{Deserialize, Serialize};

use super::defaults;

/// Smart Router configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Working Tier top-similarity threshold that short-circuits to the fast path.
    pub fast_path_threshold: f64,
    /// RRF smoothing constant used when merging hybrid results.
    pub rrf_k: u32,
    /// Default wall-clock budget for a `retrieve` call, in milliseconds.
    /// PPR and hybrid search check it between iterations and at I/O
    /// boundaries, returning `Cancelled` once it elapses.
    pub retrieve_deadline_ms: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            fast_path_threshold: defaults::DEFAULT_FAST_PATH_THRESHOLD,
            rrf_k: defaults::DEFAULT_RRF_K,
            retrieve_deadline_ms: defaults::DEFAULT_RETRIEVE_DEADLINE_MS,
        }
    }
}
