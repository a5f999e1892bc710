//! `store` / `store_decision`: the write-ordering contract — commit to the
//! graph store, then a synchronous vector upsert (rolled back on failure),
//! then a best-effort working-tier insert.

use serde_json::{json, Value};
use uuid::Uuid;

use vesper_core::models::ConversationRecord;
use vesper_core::{EmbeddingClient, GraphStore, VectorIndex, VesperError, VesperResult};
use vesper_working::WorkingTier;

use crate::types::StoreResult;

#[allow(clippy::too_many_arguments)]
pub fn store_sync(
    store: &dyn GraphStore,
    embedder: &dyn EmbeddingClient,
    vector: &dyn VectorIndex,
    working: &WorkingTier,
    collection: &str,
    namespace: &str,
    content: &str,
    memory_type: &str,
    metadata: Option<Value>,
    agent_id: Option<String>,
    task_id: Option<String>,
    is_decision: bool,
) -> VesperResult<StoreResult> {
    if content.trim().is_empty() {
        return Err(VesperError::InvalidInput("content must not be empty".to_string()));
    }

    let mut record = ConversationRecord::new(namespace, content);
    record.user_intent = memory_type.to_string();
    record.is_decision = is_decision;
    // Embedding failure is local recovery, not a store failure: the record
    // is written without a vector and flagged for back-fill by the next
    // consolidation pass.
    record.embedding = embedder.embed(content).ok();

    let payload = json!({
        "content": content,
        "memory_type": memory_type,
        "timestamp": record.timestamp.to_rfc3339(),
        "namespace": namespace,
        "metadata": metadata,
        "agent_id": agent_id,
        "task_id": task_id,
    });

    let has_embedding = commit(store, vector, working, collection, &record, payload)?;
    Ok(StoreResult { id: record.conversation_id, has_embedding })
}

/// The shared ordering: graph commit → synchronous vector upsert
/// (rollback on failure) → best-effort working-tier insert. Used by both
/// `store` and `share_context`, which writes a copy of a record into a
/// different namespace along the same path.
pub(crate) fn commit(
    store: &dyn GraphStore,
    vector: &dyn VectorIndex,
    working: &WorkingTier,
    collection: &str,
    record: &ConversationRecord,
    payload: Value,
) -> VesperResult<bool> {
    store.insert_conversation(record)?;

    let has_embedding = match &record.embedding {
        Some(vec) => {
            let id = Uuid::parse_str(&record.conversation_id)
                .map_err(|e| VesperError::Internal(format!("malformed conversation id: {e}")))?;
            if let Err(err) = vector.upsert(collection, id, vec, payload) {
                let _ = store.delete_conversation(&record.conversation_id);
                return Err(err);
            }
            true
        }
        None => false,
    };

    if let Err(err) = working.store(record.clone()) {
        tracing::warn!(
            conversation_id = %record.conversation_id,
            error = %err,
            "vesper-service: working tier insert failed, non-fatal"
        );
    }

    Ok(has_embedding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vesper_core::config::WorkingTierConfig;
    use vesper_core::errors::{EmbeddingError, VectorError};
    use vesper_core::{VectorHit, VectorStats};
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

    struct FailingVectorIndex;
    impl VectorIndex for FailingVectorIndex {
        fn init_collection(&self, _name: &str, _dim: usize) -> VesperResult<()> {
            Ok(())
        }
        fn upsert(&self, _collection: &str, _id: Uuid, _vector: &[f32], _payload: Value) -> VesperResult<()> {
            Err(VectorError::Unavailable { reason: "down for maintenance".to_string() }.into())
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
    fn vector_failure_rolls_back_the_graph_write() {
        let store = StorageEngine::open_in_memory().unwrap();
        let embedder = FixedEmbedder(vec![1.0, 0.0]);
        let vector = FailingVectorIndex;
        let working = WorkingTier::new(Arc::new(FixedEmbedder(vec![1.0, 0.0])), WorkingTierConfig::default());

        let err = store_sync(&store, &embedder, &vector, &working, "mem", "default", "hello", "note", None, None, None, false)
            .unwrap_err();
        assert_eq!(err.kind(), vesper_core::ErrorKind::Unavailable);
        // The graph commit was rolled back, so the working-tier insert (step
        // 3) never ran either.
        assert!(working.recent("default", 10).is_empty());
    }

    #[test]
    fn empty_content_is_rejected() {
        let store = StorageEngine::open_in_memory().unwrap();
        let embedder = FixedEmbedder(vec![1.0, 0.0]);
        let vector = FailingVectorIndex;
        let working = WorkingTier::new(Arc::new(FixedEmbedder(vec![1.0, 0.0])), WorkingTierConfig::default());

        let err = store_sync(&store, &embedder, &vector, &working, "mem", "default", "   ", "note", None, None, None, false)
            .unwrap_err();
        assert_eq!(err.kind(), vesper_core::ErrorKind::InvalidInput);
    }
}
