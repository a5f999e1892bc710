//! `SmartRouter`: the public façade. Always probes the Working Tier first;
//! on a miss, dispatches by query class and merges the result with
//! provenance, following a classify → search → rank → return shape.

use std::sync::Arc;

use vesper_core::config::RouterConfig;
use vesper_core::models::{Provenance, QueryClass, RetrievedResult, RouteDecision};
use vesper_core::{Deadline, EmbeddingClient, GraphStore, VectorIndex, VesperResult};
use vesper_semantic::SemanticTier;
use vesper_skills::SkillLibrary;
use vesper_working::WorkingTier;

use crate::{classify, dispatch, merge};

pub struct SmartRouter {
    store: Arc<dyn GraphStore>,
    embedder: Arc<dyn EmbeddingClient>,
    vector: Arc<dyn VectorIndex>,
    working: Arc<WorkingTier>,
    semantic: Arc<SemanticTier>,
    skills: Arc<SkillLibrary>,
    config: RouterConfig,
}

impl SmartRouter {
    pub fn new(
        store: Arc<dyn GraphStore>,
        embedder: Arc<dyn EmbeddingClient>,
        vector: Arc<dyn VectorIndex>,
        working: Arc<WorkingTier>,
        semantic: Arc<SemanticTier>,
        skills: Arc<SkillLibrary>,
        config: RouterConfig,
    ) -> Self {
        Self { store, embedder, vector, working, semantic, skills, config }
    }

    /// Classify `query`, probe the Working Tier fast path, and dispatch to
    /// the matching tier on a miss, using the configured
    /// `retrieve_deadline_ms` as the request's deadline.
    pub fn route(&self, namespace: &str, query: &str, limit: usize) -> VesperResult<(RouteDecision, Vec<RetrievedResult>)> {
        self.route_with_deadline(namespace, query, limit, Deadline::after(std::time::Duration::from_millis(self.config.retrieve_deadline_ms)))
    }

    /// Like [`Self::route`], but with an explicit deadline instead of the
    /// configured default — checked between iterations and at I/O
    /// boundaries in PPR and hybrid search, returning `Cancelled` once it
    /// elapses.
    pub fn route_with_deadline(
        &self,
        namespace: &str,
        query: &str,
        limit: usize,
        deadline: Deadline,
    ) -> VesperResult<(RouteDecision, Vec<RetrievedResult>)> {
        deadline.check()?;
        let query_class = classify::classify(query);

        let working_hits = self.working.search(namespace, query, limit);
        if let Some((_, top_score)) = working_hits.first() {
            if *top_score >= self.config.fast_path_threshold {
                tracing::debug!(namespace, query_class = ?query_class, score = top_score, "vesper-router: fast path hit");
                let results = working_hits
                    .into_iter()
                    .map(|(record, score)| RetrievedResult {
                        id: record.conversation_id.clone(),
                        content: record.full_text.clone(),
                        score,
                        source: Provenance::Working,
                        path: None,
                        matched_trigger: None,
                    })
                    .collect();
                return Ok((RouteDecision { query_class, fast_path: true }, results));
            }
        }

        deadline.check()?;
        let mut results = match query_class {
            QueryClass::Preference => dispatch::preference(&self.semantic, namespace, query)?,
            QueryClass::Factual => dispatch::factual(&self.semantic, self.store.as_ref(), namespace, query)?,
            QueryClass::Temporal => dispatch::temporal(&self.semantic, self.store.as_ref(), namespace, query, limit)?,
            QueryClass::Project => dispatch::project(&self.semantic, self.store.as_ref(), namespace, query, limit, deadline)?,
            QueryClass::Skill => dispatch::skill(&self.skills, self.embedder.as_ref(), namespace, query, limit, deadline)?,
            QueryClass::Complex => Vec::new(),
        };

        // `project` without a resolvable seed entity, and `complex` always,
        // fall through to the hybrid Vector Index search.
        if results.is_empty() {
            deadline.check()?;
            results =
                dispatch::complex(self.vector.as_ref(), self.working.as_ref(), self.embedder.as_ref(), namespace, query, limit, deadline)?;
        }

        let merged = merge::merge(results);
        Ok((RouteDecision { query_class, fast_path: false }, merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::config::{DecayConfig, SkillConfig, WorkingTierConfig};
    use vesper_core::errors::EmbeddingError;
    use vesper_core::models::{ConversationRecord, Entity, EntityType, Fact};
    use vesper_core::VectorHit;
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

    struct EmptyVectorIndex;
    impl VectorIndex for EmptyVectorIndex {
        fn init_collection(&self, _name: &str, _dim: usize) -> VesperResult<()> {
            Ok(())
        }
        fn upsert(&self, _collection: &str, _id: uuid::Uuid, _vector: &[f32], _payload: serde_json::Value) -> VesperResult<()> {
            Ok(())
        }
        fn search(&self, _collection: &str, _vector: &[f32], _top_k: usize) -> VesperResult<Vec<VectorHit>> {
            Ok(Vec::new())
        }
        fn delete(&self, _collection: &str, _id: uuid::Uuid) -> VesperResult<()> {
            Ok(())
        }
        fn stats(&self, _collection: &str) -> VesperResult<vesper_core::VectorStats> {
            Ok(vesper_core::VectorStats::default())
        }
    }

    fn build_router() -> (SmartRouter, Arc<dyn GraphStore>) {
        let store: Arc<dyn GraphStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
        let embedder: Arc<dyn EmbeddingClient> = Arc::new(FixedEmbedder(vec![1.0, 0.0]));
        let vector: Arc<dyn VectorIndex> = Arc::new(EmptyVectorIndex);
        let working = Arc::new(WorkingTier::new(embedder.clone(), WorkingTierConfig::default()));
        let semantic = Arc::new(SemanticTier::new(store.clone(), DecayConfig::default()));
        let skills = Arc::new(SkillLibrary::new(store.clone(), SkillConfig::default()));
        let router = SmartRouter::new(store.clone(), embedder, vector, working, semantic, skills, RouterConfig::default());
        (router, store)
    }

    #[test]
    fn fast_path_short_circuits_on_high_similarity() {
        let (router, _store) = build_router();
        let mut record = ConversationRecord::new("default", "Alice met Bob.");
        record.embedding = Some(vec![1.0, 0.0]);
        router.working.store(record).unwrap();

        let (decision, results) = router.route("default", "tell me about Alice", 5).unwrap();
        assert!(decision.fast_path);
        assert_eq!(results[0].source, Provenance::Working);
    }

    #[test]
    fn factual_query_resolves_entity_facts() {
        let (router, store) = build_router();
        let entity = Entity::new("default", "Berlin", EntityType::Concept);
        store.upsert_entity(&entity).unwrap();
        store.upsert_fact(&Fact::new("default", entity.id, "kind_of", "city")).unwrap();

        let (decision, results) = router.route("default", "what is Berlin", 5).unwrap();
        assert_eq!(decision.query_class, QueryClass::Factual);
        assert!(!decision.fast_path);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, Provenance::Semantic);
    }

    #[test]
    fn complex_query_with_no_hits_returns_empty() {
        let (router, _store) = build_router();
        let (decision, results) = router.route("default", "tell me something interesting", 5).unwrap();
        assert_eq!(decision.query_class, QueryClass::Complex);
        assert!(results.is_empty());
    }

    #[test]
    fn an_already_expired_deadline_cancels_the_route() {
        let (router, _store) = build_router();
        let expired = vesper_core::Deadline::after(std::time::Duration::from_millis(0));
        std::thread::sleep(std::time::Duration::from_millis(5));

        let err = router.route_with_deadline("default", "what is Berlin", 5, expired).unwrap_err();
        assert!(matches!(err, vesper_core::VesperError::Cancelled));
    }
}
