//! `SemanticTier`: the public façade over the knowledge graph, wrapping a
//! `GraphStore` handle — callers never touch `GraphStore` directly once a
//! `SemanticTier` exists.

use std::sync::Arc;

use vesper_core::config::DecayConfig;
use vesper_core::models::{Entity, EntityType, Fact, Relationship};
use vesper_core::{Deadline, GraphStore, VesperResult};

use crate::ppr::{self, PprHit, PprWithFactsHit};
use crate::preference::{self, PreferenceHit};
use crate::pruning::{self, PruneReport};
use crate::{entities, facts, relationships};

pub struct SemanticTier {
    store: Arc<dyn GraphStore>,
    decay_config: DecayConfig,
}

impl SemanticTier {
    pub fn new(store: Arc<dyn GraphStore>, decay_config: DecayConfig) -> Self {
        Self { store, decay_config }
    }

    pub fn get_or_create_entity(&self, namespace: &str, name: &str, entity_type: EntityType) -> VesperResult<Entity> {
        entities::get_or_create(self.store.as_ref(), namespace, name, entity_type)
    }

    pub fn get_entity(&self, namespace: &str, id: uuid::Uuid) -> VesperResult<Option<Entity>> {
        self.store.get_entity(namespace, id)
    }

    /// The reinforcement bump for a record's relationships during phase 2
    /// extraction: `decision_reinforcement_strength` for `store_decision`
    /// conversations, `reinforcement_bump` otherwise.
    pub fn reinforcement_bump_for(&self, is_decision: bool) -> f64 {
        if is_decision {
            self.decay_config.decision_reinforcement_strength
        } else {
            self.decay_config.reinforcement_bump
        }
    }

    pub fn upsert_or_reinforce_relationship(
        &self,
        namespace: &str,
        source_id: uuid::Uuid,
        target_id: uuid::Uuid,
        relation_type: &str,
        evidence: impl Into<String>,
    ) -> VesperResult<Relationship> {
        relationships::upsert_or_reinforce(
            self.store.as_ref(),
            namespace,
            source_id,
            target_id,
            relation_type,
            evidence,
            self.decay_config.reinforcement_bump,
        )
    }

    /// Like [`Self::upsert_or_reinforce_relationship`] but with an explicit
    /// bump instead of `decay_config.reinforcement_bump` — used when
    /// extracting relationships from a `store_decision` conversation, which
    /// reinforces with `decision_reinforcement_strength` so the edge decays
    /// slower than ordinary recall.
    pub fn upsert_or_reinforce_relationship_with_bump(
        &self,
        namespace: &str,
        source_id: uuid::Uuid,
        target_id: uuid::Uuid,
        relation_type: &str,
        evidence: impl Into<String>,
        bump: f64,
    ) -> VesperResult<Relationship> {
        relationships::upsert_or_reinforce(self.store.as_ref(), namespace, source_id, target_id, relation_type, evidence, bump)
    }

    pub fn list_relationships(&self, namespace: &str) -> VesperResult<Vec<Relationship>> {
        self.store.list_relationships(namespace)
    }

    pub fn record_fact(
        &self,
        namespace: &str,
        entity_id: uuid::Uuid,
        property: &str,
        value: &str,
        source_conversation: Option<String>,
    ) -> VesperResult<Fact> {
        facts::record_fact(self.store.as_ref(), namespace, entity_id, property, value, source_conversation)
    }

    pub fn list_facts(&self, namespace: &str, entity_id: uuid::Uuid) -> VesperResult<Vec<Fact>> {
        self.store.list_facts(namespace, entity_id)
    }

    /// Run the decay pass (consolidation phase 3). Returns the
    /// number of relationships touched.
    pub fn apply_decay(&self, namespace: &str) -> VesperResult<usize> {
        crate::decay::apply_decay(self.store.as_ref(), namespace, &self.decay_config)
    }

    /// Run the pruning pass (consolidation phase 5).
    pub fn prune(&self, namespace: &str) -> VesperResult<PruneReport> {
        pruning::prune(self.store.as_ref(), namespace, &self.decay_config)
    }

    /// Multi-hop retrieval seeded on `seed_entities`, used by the `factual`
    /// and `complex` query classes. `deadline` is checked between
    /// power-iteration steps, returning `Cancelled` once it elapses.
    pub fn personalized_page_rank(&self, namespace: &str, seed_entities: &[uuid::Uuid], limit: usize, deadline: Deadline) -> VesperResult<Vec<PprHit>> {
        ppr::personalized_page_rank(self.store.as_ref(), namespace, seed_entities, limit, deadline)
    }

    /// Like [`Self::personalized_page_rank`] but each hit carries its
    /// supporting facts and relation-type path (`path`).
    pub fn personalized_page_rank_with_facts(
        &self,
        namespace: &str,
        seed_entities: &[uuid::Uuid],
        limit: usize,
        facts_per_hit: usize,
        deadline: Deadline,
    ) -> VesperResult<Vec<PprWithFactsHit>> {
        ppr::personalized_page_rank_with_facts(self.store.as_ref(), namespace, seed_entities, limit, facts_per_hit, deadline)
    }

    /// Direct preference lookup (`preference` query class).
    pub fn preference_query(&self, namespace: &str, topic: &str) -> VesperResult<Vec<PreferenceHit>> {
        preference::preference_query(self.store.as_ref(), namespace, topic)
    }

    /// Entities touched (accessed or created) since `since` — used by the
    /// consolidation pipeline's stale relational-vector recompute phase.
    pub fn touched_entities_since(&self, namespace: &str, since: chrono::DateTime<chrono::Utc>) -> VesperResult<Vec<uuid::Uuid>> {
        self.store.touched_entities_since(namespace, since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_storage::StorageEngine;

    fn tier() -> SemanticTier {
        let store: Arc<dyn GraphStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
        SemanticTier::new(store, DecayConfig::default())
    }

    #[test]
    fn get_or_create_is_idempotent_by_name_and_type() {
        let tier = tier();
        let first = tier.get_or_create_entity("default", "Alice", EntityType::Person).unwrap();
        let second = tier.get_or_create_entity("default", "Alice", EntityType::Person).unwrap();
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn decision_bump_exceeds_the_ordinary_reinforcement_bump() {
        let tier = tier();
        assert!(tier.reinforcement_bump_for(true) > tier.reinforcement_bump_for(false));
    }

    #[test]
    fn reinforcing_with_the_decision_bump_adds_more_strength() {
        let tier = tier();
        let a = tier.get_or_create_entity("default", "Alice", EntityType::Person).unwrap();
        let b = tier.get_or_create_entity("default", "DriftCo", EntityType::Project).unwrap();

        // Decay the freshly-created edge (which starts at strength 1.0) so a
        // subsequent reinforcement has room to show the bump difference.
        tier.upsert_or_reinforce_relationship("default", a.id, b.id, "works_on", "conv-1").unwrap();
        let mut rel = tier.list_relationships("default").unwrap().remove(0);
        rel.strength = 0.1;
        tier.store.upsert_relationship(&rel).unwrap();

        let bump = tier.reinforcement_bump_for(true);
        let reinforced = tier
            .upsert_or_reinforce_relationship_with_bump("default", a.id, b.id, "works_on", "conv-2", bump)
            .unwrap();
        assert!((reinforced.strength - (0.1 + bump)).abs() < 1e-9);
    }

    #[test]
    fn reinforcing_twice_does_not_duplicate_the_edge() {
        let tier = tier();
        let a = tier.get_or_create_entity("default", "Alice", EntityType::Person).unwrap();
        let b = tier.get_or_create_entity("default", "DriftCo", EntityType::Project).unwrap();

        tier.upsert_or_reinforce_relationship("default", a.id, b.id, "works_on", "conv-1").unwrap();
        tier.upsert_or_reinforce_relationship("default", a.id, b.id, "works_on", "conv-2").unwrap();

        let all = tier.list_relationships("default").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].evidence.len(), 2);
    }
}
