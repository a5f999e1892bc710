//! `SkillLibrary`: the public façade over the Procedural Tier,
//! mirroring `vesper-semantic::SemanticTier`'s "wrap a store handle" shape.

use std::sync::Arc;

use vesper_core::config::SkillConfig;
use vesper_core::models::{Skill, SkillRelationship};
use vesper_core::{Deadline, GraphStore, VesperResult};

use crate::cooccurrence;
use crate::invocation::{self, InvocationMatch};
use crate::outcomes;
use crate::search::{self, SkillHit};
use crate::summaries::{self, SkillSummary};

pub struct SkillLibrary {
    store: Arc<dyn GraphStore>,
    config: SkillConfig,
}

impl SkillLibrary {
    pub fn new(store: Arc<dyn GraphStore>, config: SkillConfig) -> Self {
        Self { store, config }
    }

    pub fn register(&self, skill: &Skill) -> VesperResult<Skill> {
        self.store.upsert_skill(skill)
    }

    pub fn summaries(&self, namespace: &str, limit: usize, category: Option<&str>) -> VesperResult<Vec<SkillSummary>> {
        summaries::summaries(self.store.as_ref(), namespace, limit, category)
    }

    pub fn load_full(&self, namespace: &str, skill_id: uuid::Uuid) -> VesperResult<Option<Skill>> {
        summaries::load_full(self.store.as_ref(), namespace, skill_id)
    }

    pub fn find_by_name(&self, namespace: &str, name: &str) -> VesperResult<Option<Skill>> {
        self.store.get_skill_by_name(namespace, name)
    }

    pub fn detect_invocation(&self, namespace: &str, query: &str, most_recently_used: Option<uuid::Uuid>) -> VesperResult<InvocationMatch> {
        invocation::detect_invocation(self.store.as_ref(), namespace, query, most_recently_used)
    }

    pub fn search_by_embedding(&self, namespace: &str, query_embedding: &[f32], limit: usize) -> VesperResult<Vec<SkillHit>> {
        search::search_by_embedding(self.store.as_ref(), namespace, query_embedding, limit)
    }

    pub fn hybrid_search(&self, namespace: &str, query: &str, query_embedding: &[f32], limit: usize, deadline: Deadline) -> VesperResult<Vec<SkillHit>> {
        search::hybrid_search(self.store.as_ref(), namespace, query, query_embedding, limit, deadline)
    }

    pub fn relational_search(&self, namespace: &str, a: uuid::Uuid, b: uuid::Uuid, c: uuid::Uuid) -> VesperResult<Vec<SkillHit>> {
        search::relational_search(self.store.as_ref(), namespace, a, b, c)
    }

    pub fn record_cooccurrence(&self, namespace: &str, skill_a: uuid::Uuid, skill_b: uuid::Uuid) -> VesperResult<SkillRelationship> {
        cooccurrence::record_cooccurrence(self.store.as_ref(), namespace, skill_a, skill_b, &self.config)
    }

    /// Consolidation phase 7: recompute relational vectors gone
    /// stale since their embeddings last changed.
    pub fn recompute_stale_relational_vectors(&self, namespace: &str) -> VesperResult<usize> {
        cooccurrence::recompute_stale_relational_vectors(self.store.as_ref(), namespace, &self.config)
    }

    pub fn record_success(&self, namespace: &str, skill_id: uuid::Uuid, satisfaction: Option<f64>) -> VesperResult<Skill> {
        outcomes::record_success(self.store.as_ref(), namespace, skill_id, satisfaction)
    }

    pub fn record_failure(&self, namespace: &str, skill_id: uuid::Uuid) -> VesperResult<Skill> {
        outcomes::record_failure(self.store.as_ref(), namespace, skill_id)
    }
}
