//! WorkingTier — the Working Tier façade over a per-namespace `DashMap` of
//! rings.

use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use vesper_core::config::WorkingTierConfig;
use vesper_core::models::ConversationRecord;
use vesper_core::{vector_math, EmbeddingClient, VesperResult};

use crate::ring::NamespaceRing;

/// A single search hit: the stored record plus its cosine similarity to the
/// query embedding.
pub type SearchHit = (ConversationRecord, f64);

/// In-memory Working Tier. Keyed by namespace via `DashMap`; each
/// namespace's ring is additionally guarded by its own `RwLock` so a write
/// never blocks a different namespace's readers or writers.
pub struct WorkingTier {
    rings: DashMap<String, Arc<RwLock<NamespaceRing>>>,
    embedder: Arc<dyn EmbeddingClient>,
    config: WorkingTierConfig,
}

impl WorkingTier {
    pub fn new(embedder: Arc<dyn EmbeddingClient>, config: WorkingTierConfig) -> Self {
        Self { rings: DashMap::new(), embedder, config }
    }

    fn ring_for(&self, namespace: &str) -> Arc<RwLock<NamespaceRing>> {
        self.rings
            .entry(namespace.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(NamespaceRing::default())))
            .clone()
    }

    /// Insert a record into its namespace's ring, enforcing the capacity
    /// and TTL caps on write.
    pub fn store(&self, record: ConversationRecord) -> VesperResult<()> {
        let ring = self.ring_for(&record.namespace);
        let mut guard = ring.write().expect("working tier ring poisoned");
        guard.push(record, self.config.capacity, self.config.ttl_secs);
        Ok(())
    }

    /// Embed `query_text` and return the top-`k` records by cosine
    /// similarity against cached embeddings. Records without an embedding
    /// (degraded writes) are skipped. Returns `[]` if the ring is empty or
    /// the embedder is degraded ("If cache is empty, return []").
    pub fn search(&self, namespace: &str, query_text: &str, k: usize) -> Vec<SearchHit> {
        let ring = self.ring_for(namespace);
        let guard = ring.read().expect("working tier ring poisoned");
        if guard.is_empty() {
            return Vec::new();
        }

        let query_vec = match self.embedder.embed(query_text) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let mut hits: Vec<SearchHit> = guard
            .iter_recent()
            .filter_map(|record| {
                record
                    .embedding
                    .as_ref()
                    .map(|e| (record.clone(), vector_math::cosine_similarity(&query_vec, e)))
            })
            .collect();

        hits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        hits
    }

    /// The `k` most recently stored records, newest first.
    pub fn recent(&self, namespace: &str, k: usize) -> Vec<ConversationRecord> {
        let ring = self.ring_for(namespace);
        let guard = ring.read().expect("working tier ring poisoned");
        guard.iter_recent().take(k).cloned().collect()
    }

    /// Clear a namespace's ring (post-consolidation lifecycle step).
    pub fn clear(&self, namespace: &str) {
        let ring = self.ring_for(namespace);
        ring.write().expect("working tier ring poisoned").clear();
    }

    /// Snapshot and drain a namespace's ring for consolidation (phase 1
    /// snapshots, phase 9 clears). Expired records are purged first so the
    /// snapshot never contains a record past its TTL.
    pub fn drain_for_consolidation(&self, namespace: &str) -> Vec<ConversationRecord> {
        let ring = self.ring_for(namespace);
        let mut guard = ring.write().expect("working tier ring poisoned");
        guard.evict_expired(self.config.ttl_secs);
        guard.drain_consolidated()
    }

    /// Back-fill a record's embedding after a successful retry following
    /// degraded-path recovery.
    pub fn set_embedding(&self, namespace: &str, conversation_id: &str, embedding: Vec<f32>) -> bool {
        let ring = self.ring_for(namespace);
        let mut guard = ring.write().expect("working tier ring poisoned");
        guard.set_embedding(conversation_id, embedding)
    }

    /// Remove a single record by id, for `delete_memory`.
    pub fn remove(&self, namespace: &str, conversation_id: &str) -> bool {
        let ring = self.ring_for(namespace);
        let mut guard = ring.write().expect("working tier ring poisoned");
        guard.remove(conversation_id)
    }

    pub fn namespaces(&self) -> Vec<String> {
        self.rings.iter().map(|r| r.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::errors::EmbeddingError;

    struct FixedEmbedder(Vec<f32>);
    impl EmbeddingClient for FixedEmbedder {
        fn embed(&self, text: &str) -> VesperResult<Vec<f32>> {
            if text.trim().is_empty() {
                return Err(EmbeddingError::EmptyInput.into());
            }
            Ok(self.0.clone())
        }
        fn embed_batch(&self, texts: &[String]) -> VesperResult<Vec<Vec<f32>>> {
            texts.iter().map(|t| self.embed(t)).collect()
        }
        fn dimensions(&self) -> usize {
            self.0.len()
        }
        fn health(&self) -> bool {
            true
        }
    }

    fn record_with_embedding(namespace: &str, text: &str, embedding: Vec<f32>) -> ConversationRecord {
        let mut r = ConversationRecord::new(namespace, text);
        r.embedding = Some(embedding);
        r
    }

    #[test]
    fn empty_ring_search_returns_empty() {
        let tier = WorkingTier::new(Arc::new(FixedEmbedder(vec![1.0, 0.0])), WorkingTierConfig::default());
        assert!(tier.search("default", "hello", 5).is_empty());
    }

    #[test]
    fn capacity_keeps_only_newest_n() {
        let tier = WorkingTier::new(Arc::new(FixedEmbedder(vec![1.0, 0.0])), WorkingTierConfig::default());
        for i in 0..10 {
            tier.store(record_with_embedding("default", &format!("msg {i}"), vec![1.0, 0.0])).unwrap();
        }
        assert_eq!(tier.recent("default", 100).len(), 5);
    }

    #[test]
    fn search_ranks_by_cosine_similarity() {
        let tier = WorkingTier::new(Arc::new(FixedEmbedder(vec![1.0, 0.0])), WorkingTierConfig::default());
        tier.store(record_with_embedding("default", "a", vec![1.0, 0.0])).unwrap();
        tier.store(record_with_embedding("default", "b", vec![0.0, 1.0])).unwrap();
        let hits = tier.search("default", "query", 2);
        assert_eq!(hits[0].0.full_text, "a");
    }

    #[test]
    fn namespaces_are_isolated() {
        let tier = WorkingTier::new(Arc::new(FixedEmbedder(vec![1.0, 0.0])), WorkingTierConfig::default());
        tier.store(record_with_embedding("ns-a", "a", vec![1.0, 0.0])).unwrap();
        tier.store(record_with_embedding("ns-b", "b", vec![1.0, 0.0])).unwrap();
        assert_eq!(tier.recent("ns-a", 10).len(), 1);
        assert_eq!(tier.recent("ns-b", 10).len(), 1);
    }
}
