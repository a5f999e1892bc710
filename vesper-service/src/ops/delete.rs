//! `delete_memory` (round-trip law): remove a conversation
//! from the graph store, the vector index, and the working tier. A missing
//! point in any one tier is not an error — the round-trip law only requires
//! that nothing is left behind.

use uuid::Uuid;

use vesper_core::{ErrorKind, GraphStore, VectorIndex, VesperResult};
use vesper_working::WorkingTier;

pub fn delete_sync(
    store: &dyn GraphStore,
    vector: &dyn VectorIndex,
    working: &WorkingTier,
    collection: &str,
    namespace: &str,
    conversation_id: &str,
) -> VesperResult<bool> {
    let graph_removed = store.delete_conversation(conversation_id)?;

    let mut vector_removed = false;
    if let Ok(id) = Uuid::parse_str(conversation_id) {
        match vector.delete(collection, id) {
            Ok(()) => vector_removed = true,
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(conversation_id, error = %err, "vesper-service: vector delete failed"),
        }
    }

    let working_removed = working.remove(namespace, conversation_id);
    Ok(graph_removed || vector_removed || working_removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use serde_json::Value;
    use vesper_core::config::WorkingTierConfig;
    use vesper_core::errors::EmbeddingError;
    use vesper_core::models::ConversationRecord;
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

    struct RecordingVectorIndex {
        deleted: std::sync::Mutex<Vec<Uuid>>,
    }
    impl VectorIndex for RecordingVectorIndex {
        fn init_collection(&self, _name: &str, _dim: usize) -> VesperResult<()> {
            Ok(())
        }
        fn upsert(&self, _collection: &str, _id: Uuid, _vector: &[f32], _payload: Value) -> VesperResult<()> {
            Ok(())
        }
        fn search(&self, _collection: &str, _vector: &[f32], _top_k: usize) -> VesperResult<Vec<VectorHit>> {
            Ok(Vec::new())
        }
        fn delete(&self, _collection: &str, id: Uuid) -> VesperResult<()> {
            self.deleted.lock().unwrap().push(id);
            Ok(())
        }
        fn stats(&self, _collection: &str) -> VesperResult<VectorStats> {
            Ok(VectorStats::default())
        }
    }

    #[test]
    fn delete_removes_from_every_tier() {
        let store = StorageEngine::open_in_memory().unwrap();
        let vector = RecordingVectorIndex { deleted: std::sync::Mutex::new(Vec::new()) };
        let embedder: Arc<dyn EmbeddingClient> = Arc::new(FixedEmbedder(vec![1.0, 0.0]));
        let working = WorkingTier::new(embedder, WorkingTierConfig::default());

        let mut record = ConversationRecord::new("default", "remember this");
        record.embedding = Some(vec![1.0, 0.0]);
        store.insert_conversation(&record).unwrap();
        working.store(record.clone()).unwrap();

        let removed = delete_sync(&store, &vector, &working, "mem", "default", &record.conversation_id).unwrap();
        assert!(removed);
        assert_eq!(vector.deleted.lock().unwrap().len(), 1);
        assert!(working.recent("default", 10).is_empty());
        assert!(!store.delete_conversation(&record.conversation_id).unwrap());
    }

    #[test]
    fn deleting_an_unknown_id_is_not_an_error() {
        let store = StorageEngine::open_in_memory().unwrap();
        let vector = RecordingVectorIndex { deleted: std::sync::Mutex::new(Vec::new()) };
        let embedder: Arc<dyn EmbeddingClient> = Arc::new(FixedEmbedder(vec![1.0, 0.0]));
        let working = WorkingTier::new(embedder, WorkingTierConfig::default());

        let removed = delete_sync(&store, &vector, &working, "mem", "default", "does-not-exist").unwrap();
        assert!(!removed);
    }
}
