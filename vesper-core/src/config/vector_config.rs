use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector Index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorIndexConfig {
    /// Base URL of the external vector index service (`VECTOR_URL`).
    pub service_url: String,
    /// Optional bearer token (`VECTOR_API_KEY`).
    pub api_key: Option<String>,
    /// Collection name used for all memory vectors.
    pub collection: String,
    /// Vector dimensionality (must match the Embedding Client).
    pub dimensions: usize,
}

impl Default for VectorIndexConfig {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:6333".to_string(),
            api_key: None,
            collection: defaults::DEFAULT_VECTOR_COLLECTION.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIM,
        }
    }
}
