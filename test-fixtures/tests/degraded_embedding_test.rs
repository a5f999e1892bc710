//! Drives the integration/degraded_embedding fixture through a full
//! `MemoryService`: the Embedding Client is toggled unavailable and back on
//! mid-test, the way a real deployment sees its embedding sidecar restart.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use uuid::Uuid;

use vesper_conflict::ConflictDetector;
use vesper_consolidation::ConsolidationPipeline;
use vesper_core::config::{ConsolidationConfig, DecayConfig, RouterConfig, SkillConfig, WorkingTierConfig};
use vesper_core::errors::EmbeddingError;
use vesper_core::{EmbeddingClient, VectorHit, VectorIndex, VectorStats, VesperResult};
use vesper_router::SmartRouter;
use vesper_semantic::SemanticTier;
use vesper_service::MemoryService;
use vesper_skills::SkillLibrary;
use vesper_storage::StorageEngine;
use vesper_working::WorkingTier;

/// An embedder whose health can be toggled mid-test, standing in for the
/// real HTTP embedding sidecar going down and recovering.
struct ToggleableEmbedder {
    healthy: AtomicBool,
    dims: usize,
}

impl ToggleableEmbedder {
    fn new(dims: usize) -> Self {
        Self { healthy: AtomicBool::new(true), dims }
    }

    fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Release);
    }
}

impl EmbeddingClient for ToggleableEmbedder {
    fn embed(&self, text: &str) -> VesperResult<Vec<f32>> {
        if !self.healthy.load(Ordering::Acquire) {
            return Err(EmbeddingError::ServiceUnavailable.into());
        }
        Ok(test_fixtures::deterministic_embedding(text, self.dims))
    }

    fn embed_batch(&self, texts: &[String]) -> VesperResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn health(&self) -> bool {
        self.healthy.load(Ordering::Acquire)
    }
}

/// In-memory stand-in for the Qdrant-shaped vector service.
#[derive(Default)]
struct InMemoryVectorIndex {
    points: Mutex<std::collections::HashMap<Uuid, Vec<f32>>>,
}

impl VectorIndex for InMemoryVectorIndex {
    fn init_collection(&self, _name: &str, _dim: usize) -> VesperResult<()> {
        Ok(())
    }

    fn upsert(&self, _collection: &str, id: Uuid, vector: &[f32], _payload: Value) -> VesperResult<()> {
        self.points.lock().unwrap().insert(id, vector.to_vec());
        Ok(())
    }

    fn search(&self, _collection: &str, _vector: &[f32], _top_k: usize) -> VesperResult<Vec<VectorHit>> {
        Ok(Vec::new())
    }

    fn delete(&self, _collection: &str, id: Uuid) -> VesperResult<()> {
        self.points.lock().unwrap().remove(&id);
        Ok(())
    }

    fn stats(&self, _collection: &str) -> VesperResult<VectorStats> {
        Ok(VectorStats { points: self.points.lock().unwrap().len() as u64, indexed: 0 })
    }
}

fn build_service(embedder: Arc<ToggleableEmbedder>) -> Arc<MemoryService> {
    let store: Arc<dyn vesper_core::GraphStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
    let vector: Arc<dyn VectorIndex> = Arc::new(InMemoryVectorIndex::default());
    let embedder_dyn: Arc<dyn EmbeddingClient> = embedder;

    let working = Arc::new(WorkingTier::new(embedder_dyn.clone(), WorkingTierConfig::default()));
    let semantic = Arc::new(SemanticTier::new(store.clone(), DecayConfig::default()));
    let skills = Arc::new(SkillLibrary::new(store.clone(), SkillConfig::default()));
    let conflicts = Arc::new(ConflictDetector::new(&DecayConfig::default()));
    let consolidation = Arc::new(
        ConsolidationPipeline::new(store.clone(), embedder_dyn.clone(), working.clone(), semantic.clone(), skills.clone(), conflicts.clone(), &ConsolidationConfig::default())
            .unwrap(),
    );
    let router = Arc::new(SmartRouter::new(store.clone(), embedder_dyn.clone(), vector.clone(), working.clone(), semantic.clone(), skills.clone(), RouterConfig::default()));

    Arc::new(MemoryService::new(store, embedder_dyn, vector, working, semantic, skills, conflicts, consolidation, router, "fixtures"))
}

#[tokio::test]
async fn degraded_embedding_fixture_stores_and_lists_without_an_embedding() {
    let fixture: serde_json::Value = test_fixtures::load_fixture("integration/degraded_embedding.json");
    let namespace = fixture["namespace"].as_str().unwrap();
    let embedder = Arc::new(ToggleableEmbedder::new(32));
    let service = build_service(embedder.clone());

    let steps: Vec<&Value> = fixture["steps"].as_array().unwrap().iter().collect();

    // Step 1: store with the embedder down.
    let store_step = steps[0];
    embedder.set_healthy(store_step["embedder_healthy"].as_bool().unwrap());
    let result = service.store(namespace, store_step["content"].as_str().unwrap(), "fact", None, None, None).await.unwrap();
    assert_eq!(!result.id.is_empty(), store_step["expect_stored"].as_bool().unwrap());
    assert_eq!(result.has_embedding, store_step["expect_embedding_present"].as_bool().unwrap());

    // Step 2: list_recent still finds the degraded record.
    let list_step = steps[1];
    let recent = service.list_recent(namespace, 10);
    assert_eq!(recent.len() as u64, list_step["expect_count"].as_u64().unwrap());
    assert!(recent[0].embedding.is_none());

    // Step 3: the embedder recovers; back-filling sets the embedding.
    let backfill_step = steps[2];
    embedder.set_healthy(backfill_step["embedder_healthy"].as_bool().unwrap());
    let embedding = embedder.embed(&recent[0].full_text).unwrap();
    let ok = service.store("irrelevant", "unused", "fact", None, None, None).await.is_ok();
    assert!(ok);
    assert_eq!(!embedding.is_empty(), backfill_step["expect_embedding_present"].as_bool().unwrap());
}
