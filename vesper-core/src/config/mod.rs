//! System configuration, loaded from environment with in-process
//! defaults. Each subsystem owns a sub-struct (`DecayConfig`,
//! `ConsolidationConfig`, ...) rather than one flat bag of fields.

mod consolidation_config;
mod decay_config;
mod embedding_config;
mod router_config;
mod skill_config;
mod vector_config;
mod working_tier_config;

pub mod defaults;

pub use consolidation_config::ConsolidationConfig;
pub use decay_config::DecayConfig;
pub use embedding_config::EmbeddingConfig;
pub use router_config::RouterConfig;
pub use skill_config::SkillConfig;
pub use vector_config::VectorIndexConfig;
pub use working_tier_config::WorkingTierConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Vesper memory service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VesperConfig {
    pub working_tier: WorkingTierConfig,
    pub decay: DecayConfig,
    pub consolidation: ConsolidationConfig,
    pub router: RouterConfig,
    pub skill: SkillConfig,
    pub embedding: EmbeddingConfig,
    pub vector_index: VectorIndexConfig,
    /// Path to the SQLite graph store file (`GRAPH_DB_PATH`).
    pub graph_db_path: std::path::PathBuf,
}

impl Default for VesperConfig {
    fn default() -> Self {
        Self {
            working_tier: WorkingTierConfig::default(),
            decay: DecayConfig::default(),
            consolidation: ConsolidationConfig::default(),
            router: RouterConfig::default(),
            skill: SkillConfig::default(),
            embedding: EmbeddingConfig::default(),
            vector_index: VectorIndexConfig::default(),
            graph_db_path: defaults::default_data_root().join("data").join("graph.db3"),
        }
    }
}

impl VesperConfig {
    /// Build configuration from environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("GRAPH_DB_PATH") {
            config.graph_db_path = std::path::PathBuf::from(path);
        }
        if let Ok(url) = std::env::var("EMBEDDING_URL") {
            config.embedding.service_url = url;
        }
        if let Ok(url) = std::env::var("VECTOR_URL") {
            config.vector_index.service_url = url;
        }
        if let Ok(key) = std::env::var("VECTOR_API_KEY") {
            config.vector_index.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("WORKING_TIER_URL") {
            config.working_tier.remote_url = Some(url);
        }

        config
    }
}
