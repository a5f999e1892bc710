//! Pruning rule: drop relationships where
//! `strength < threshold AND access_count < threshold AND age ≥ prune_age_days`.
//! Never removes a relationship with `access_count ≥ 3` in the last 90 days
//! (invariant) — the rule is a conjunction, so any clause failing
//! to hold protects the edge.

use chrono::Utc;
use vesper_core::config::DecayConfig;
use vesper_core::{GraphStore, VesperResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct PruneReport {
    pub relationships_pruned: usize,
}

pub fn prune(store: &dyn GraphStore, namespace: &str, config: &DecayConfig) -> VesperResult<PruneReport> {
    let now = Utc::now();
    let relationships = store.list_relationships(namespace)?;
    let mut pruned = 0;

    for rel in relationships {
        let age_days = (now - rel.created_at).num_days();
        let should_prune = rel.strength < config.prune_strength_threshold
            && rel.access_count < config.prune_access_count_threshold
            && age_days >= config.prune_age_days;

        if should_prune {
            store.delete_relationship(namespace, rel.id)?;
            pruned += 1;
        }
    }

    tracing::debug!(namespace, pruned, "vesper-semantic: pruning pass complete");
    Ok(PruneReport { relationships_pruned: pruned })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::models::Relationship;
    use vesper_storage::StorageEngine;

    #[test]
    fn protects_relationship_with_high_access_count() {
        let store = StorageEngine::open_in_memory().unwrap();
        let mut rel = Relationship::new("default", uuid::Uuid::new_v4(), uuid::Uuid::new_v4(), "uses", "c1");
        rel.strength = 0.01;
        rel.access_count = 5;
        rel.created_at = Utc::now() - chrono::Duration::days(200);
        store.upsert_relationship(&rel).unwrap();

        let report = prune(&store, "default", &DecayConfig::default()).unwrap();
        assert_eq!(report.relationships_pruned, 0);
    }

    #[test]
    fn prunes_weak_old_untouched_relationship() {
        let store = StorageEngine::open_in_memory().unwrap();
        let mut rel = Relationship::new("default", uuid::Uuid::new_v4(), uuid::Uuid::new_v4(), "uses", "c1");
        rel.strength = 0.01;
        rel.access_count = 0;
        rel.created_at = Utc::now() - chrono::Duration::days(200);
        store.upsert_relationship(&rel).unwrap();

        let report = prune(&store, "default", &DecayConfig::default()).unwrap();
        assert_eq!(report.relationships_pruned, 1);
    }
}
