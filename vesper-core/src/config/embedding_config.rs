use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of the external embedding HTTP service (`EMBEDDING_URL`).
    pub service_url: String,
    /// Expected output dimensionality.
    pub dimensions: usize,
    /// Per-request timeout, in milliseconds.
    pub timeout_ms: u64,
    /// Retry attempts on transport error, with exponential backoff.
    pub retries: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:8081".to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIM,
            timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
            retries: defaults::DEFAULT_EMBEDDING_RETRIES,
        }
    }
}
