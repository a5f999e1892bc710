//! HttpEmbeddingClient — implements `vesper_core::EmbeddingClient` over the
//! external embedding HTTP service.

use vesper_core::errors::EmbeddingError;
use vesper_core::{vector_math, EmbeddingClient, VesperResult};

use crate::cache::EmbeddingCache;
use crate::transport::{EmbeddingTransport, TransportConfig};

/// Text → unit vector client. Trims input, rejects empty text as
/// `InvalidInput`, retries transport failures, and caches by content hash.
pub struct HttpEmbeddingClient {
    transport: EmbeddingTransport,
    cache: EmbeddingCache,
    dimensions: usize,
}

impl HttpEmbeddingClient {
    pub fn new(config: TransportConfig, dimensions: usize) -> Self {
        Self {
            transport: EmbeddingTransport::new(config),
            cache: EmbeddingCache::new(10_000),
            dimensions,
        }
    }

    fn normalize_and_validate(&self, mut vector: Vec<f32>) -> VesperResult<Vec<f32>> {
        if vector.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            }
            .into());
        }
        vector_math::normalize(&mut vector);
        Ok(vector)
    }
}

impl EmbeddingClient for HttpEmbeddingClient {
    fn embed(&self, text: &str) -> VesperResult<Vec<f32>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(EmbeddingError::EmptyInput.into());
        }
        if let Some(cached) = self.cache.get(trimmed) {
            return Ok(cached);
        }
        let mut embeddings = self.transport.embed_batch(&[trimmed.to_string()])?;
        let raw = embeddings.pop().ok_or_else(|| EmbeddingError::MalformedResponse {
            reason: "empty embeddings array".to_string(),
        })?;
        let vector = self.normalize_and_validate(raw)?;
        self.cache.insert(trimmed, vector.clone());
        Ok(vector)
    }

    fn embed_batch(&self, texts: &[String]) -> VesperResult<Vec<Vec<f32>>> {
        let trimmed: Vec<String> = texts.iter().map(|t| t.trim().to_string()).collect();
        if trimmed.iter().any(|t| t.is_empty()) {
            return Err(EmbeddingError::EmptyInput.into());
        }

        let mut uncached_idx = Vec::new();
        let mut uncached_texts = Vec::new();
        let mut results: Vec<Option<Vec<f32>>> = vec![None; trimmed.len()];

        for (i, t) in trimmed.iter().enumerate() {
            if let Some(cached) = self.cache.get(t) {
                results[i] = Some(cached);
            } else {
                uncached_idx.push(i);
                uncached_texts.push(t.clone());
            }
        }

        if !uncached_texts.is_empty() {
            let fetched = self.transport.embed_batch(&uncached_texts)?;
            if fetched.len() != uncached_texts.len() {
                return Err(EmbeddingError::MalformedResponse {
                    reason: format!(
                        "expected {} embeddings, got {}",
                        uncached_texts.len(),
                        fetched.len()
                    ),
                }
                .into());
            }
            for (pos, raw) in uncached_idx.into_iter().zip(fetched.into_iter()) {
                let vector = self.normalize_and_validate(raw)?;
                self.cache.insert(&trimmed[pos], vector.clone());
                results[pos] = Some(vector);
            }
        }

        Ok(results.into_iter().map(|r| r.expect("every index filled")).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn health(&self) -> bool {
        self.transport.health()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_invalid_input() {
        let client = HttpEmbeddingClient::new(TransportConfig::default(), 1024);
        let err = client.embed("   ").unwrap_err();
        assert_eq!(err.kind(), vesper_core::ErrorKind::InvalidInput);
    }
}
