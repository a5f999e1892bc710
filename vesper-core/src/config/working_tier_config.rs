use serde::{Deserialize, Serialize};

use super::defaults;

/// Working Tier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingTierConfig {
    /// Max records retained per namespace.
    pub capacity: usize,
    /// TTL, in seconds, before a record is evicted regardless of capacity.
    pub ttl_secs: u64,
    /// Optional remote backend URL (`WORKING_TIER_URL`); `None` keeps records in-process.
    pub remote_url: Option<String>,
}

impl Default for WorkingTierConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::DEFAULT_WORKING_TIER_CAPACITY,
            ttl_secs: defaults::DEFAULT_WORKING_TIER_TTL_SECS,
            remote_url: None,
        }
    }
}
