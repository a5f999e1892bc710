//! `share_context`: copy the working tier's recent records from one
//! namespace into another, optionally filtered by a case-insensitive
//! substring match on content, reusing each record's existing embedding
//! rather than re-embedding. One `Handoff` audit row is written with the
//! real copied count. Copy semantics (whether to re-embed, whether a
//! filter miss still advances the handoff counter) aren't pinned down
//! precisely elsewhere, so this is the canonical behavior — see DESIGN.md.

use serde_json::json;

use vesper_core::models::{ConversationRecord, Handoff};
use vesper_core::{GraphStore, VectorIndex, VesperResult};
use vesper_working::WorkingTier;

use crate::ops::store::commit;
use crate::types::ShareContextResult;

pub fn share_sync(
    store: &dyn GraphStore,
    vector: &dyn VectorIndex,
    working: &WorkingTier,
    collection: &str,
    from_namespace: &str,
    to_namespace: &str,
    filter: Option<&str>,
) -> VesperResult<ShareContextResult> {
    let candidates = working.recent(from_namespace, usize::MAX);
    let matches = |record: &ConversationRecord| match filter {
        Some(needle) => record.full_text.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    };

    let mut copied = 0u64;
    for source in candidates.iter().filter(|r| matches(r)) {
        let mut record = ConversationRecord::new(to_namespace, source.full_text.clone());
        record.embedding = source.embedding.clone();
        record.key_entities = source.key_entities.clone();
        record.topics = source.topics.clone();
        record.user_intent = source.user_intent.clone();

        let payload = json!({
            "content": record.full_text,
            "memory_type": record.user_intent,
            "timestamp": record.timestamp.to_rfc3339(),
            "namespace": to_namespace,
            "shared_from": from_namespace,
        });

        commit(store, vector, working, collection, &record, payload)?;
        copied += 1;
    }

    let handoff = Handoff::new(from_namespace, to_namespace, filter.map(String::from), copied);
    store.insert_handoff(&handoff)?;

    Ok(ShareContextResult { copied, handoff_id: handoff.id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use serde_json::Value;
    use uuid::Uuid;
    use vesper_core::config::WorkingTierConfig;
    use vesper_core::errors::EmbeddingError;
    use vesper_core::{EmbeddingClient, VectorHit, VectorStats};
    use vesper_storage::StorageEngine;

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

    struct NoopVectorIndex;
    impl VectorIndex for NoopVectorIndex {
        fn init_collection(&self, _name: &str, _dim: usize) -> VesperResult<()> {
            Ok(())
        }
        fn upsert(&self, _collection: &str, _id: Uuid, _vector: &[f32], _payload: Value) -> VesperResult<()> {
            Ok(())
        }
        fn search(&self, _collection: &str, _vector: &[f32], _top_k: usize) -> VesperResult<Vec<VectorHit>> {
            Ok(Vec::new())
        }
        fn delete(&self, _collection: &str, _id: Uuid) -> VesperResult<()> {
            Ok(())
        }
        fn stats(&self, _collection: &str) -> VesperResult<VectorStats> {
            Ok(VectorStats::default())
        }
    }

    #[test]
    fn copies_matching_records_into_the_target_namespace() {
        let store = StorageEngine::open_in_memory().unwrap();
        let vector = NoopVectorIndex;
        let embedder: Arc<dyn EmbeddingClient> = Arc::new(FixedEmbedder(vec![1.0, 0.0]));
        let working = WorkingTier::new(embedder, WorkingTierConfig::default());

        let mut a = ConversationRecord::new("alpha", "the deploy pipeline uses blue-green releases");
        a.embedding = Some(vec![1.0, 0.0]);
        working.store(a).unwrap();
        let mut b = ConversationRecord::new("alpha", "lunch recommendations near the office");
        b.embedding = Some(vec![1.0, 0.0]);
        working.store(b).unwrap();

        let result = share_sync(&store, &vector, &working, "mem", "alpha", "beta", Some("deploy")).unwrap();
        assert_eq!(result.copied, 1);
        assert_eq!(working.recent("beta", 10).len(), 1);
    }

    #[test]
    fn writes_a_handoff_record_even_when_nothing_matches() {
        let store = StorageEngine::open_in_memory().unwrap();
        let vector = NoopVectorIndex;
        let embedder: Arc<dyn EmbeddingClient> = Arc::new(FixedEmbedder(vec![1.0, 0.0]));
        let working = WorkingTier::new(embedder, WorkingTierConfig::default());

        let result = share_sync(&store, &vector, &working, "mem", "alpha", "beta", Some("nonexistent")).unwrap();
        assert_eq!(result.copied, 0);
        assert!(!result.handoff_id.is_empty());
    }
}
