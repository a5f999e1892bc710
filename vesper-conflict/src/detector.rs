//! `ConflictDetector`: orchestrates the strategy registry over an
//! entity's facts, applies the confidence-ceiling side effect, and writes
//! idempotent conflict records.

use vesper_core::config::DecayConfig;
use vesper_core::models::{Conflict, EntityType};
use vesper_core::{GraphStore, VesperResult};

use crate::strategies;

pub struct ConflictDetector {
    confidence_ceiling: f64,
}

impl ConflictDetector {
    pub fn new(config: &DecayConfig) -> Self {
        Self { confidence_ceiling: config.conflict_confidence_ceiling }
    }

    /// Detect conflicts among `entity_id`'s facts, grouped by property, and
    /// persist any new ones. Never deletes or overwrites fact values — only
    /// applies the confidence ceiling and writes the conflict record.
    /// Idempotent: re-running against an already-detected pair is a no-op.
    pub fn detect_for_entity(&self, store: &dyn GraphStore, namespace: &str, entity_id: uuid::Uuid) -> VesperResult<Vec<Conflict>> {
        let entity = match store.get_entity(namespace, entity_id)? {
            Some(e) => e,
            None => return Ok(Vec::new()),
        };
        let is_preference = entity.entity_type == EntityType::Preference;

        let facts = store.list_facts(namespace, entity_id)?;
        let mut detected = Vec::new();

        for i in 0..facts.len() {
            for j in (i + 1)..facts.len() {
                let a = &facts[i];
                let b = &facts[j];

                let Some(detection) = strategies::detect_all(is_preference, a, b) else {
                    continue;
                };

                if store.conflict_exists(namespace, a.id, b.id, detection.conflict_type)? {
                    continue;
                }

                store.set_fact_confidence(namespace, a.id, a.confidence.min(self.confidence_ceiling))?;
                store.set_fact_confidence(namespace, b.id, b.confidence.min(self.confidence_ceiling))?;

                let conflict = Conflict::new(namespace, a.id, b.id, detection.conflict_type, detection.description, detection.severity);
                if let Some(written) = store.upsert_conflict(&conflict)? {
                    tracing::debug!(namespace, entity_id = %entity_id, conflict_type = ?detection.conflict_type, "vesper-conflict: new conflict detected");
                    detected.push(written);
                }
            }
        }

        Ok(detected)
    }

    /// Run detection over every entity touched since the last consolidation
    /// pass (consolidation phase 4).
    pub fn detect_for_touched_entities(&self, store: &dyn GraphStore, namespace: &str, entity_ids: &[uuid::Uuid]) -> VesperResult<Vec<Conflict>> {
        let mut all = Vec::new();
        for &id in entity_ids {
            all.extend(self.detect_for_entity(store, namespace, id)?);
        }
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::models::Entity;
    use vesper_storage::StorageEngine;

    #[test]
    fn detection_is_idempotent_across_reruns() {
        let store = StorageEngine::open_in_memory().unwrap();
        let entity = Entity::new("default", "Alice", EntityType::Person);
        store.upsert_entity(&entity).unwrap();

        let mut a = vesper_core::models::Fact::new("default", entity.id, "location", "Berlin");
        let mut b = vesper_core::models::Fact::new("default", entity.id, "location", "Lisbon");
        a.entity_id = entity.id;
        b.entity_id = entity.id;
        store.upsert_fact(&a).unwrap();
        store.upsert_fact(&b).unwrap();

        let detector = ConflictDetector::new(&DecayConfig::default());
        let first = detector.detect_for_entity(&store, "default", entity.id).unwrap();
        let second = detector.detect_for_entity(&store, "default", entity.id).unwrap();

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(store.list_conflicts("default").unwrap().len(), 1);
    }

    #[test]
    fn confidence_ceiling_applied_to_both_facts() {
        let store = StorageEngine::open_in_memory().unwrap();
        let entity = Entity::new("default", "Alice", EntityType::Person);
        store.upsert_entity(&entity).unwrap();

        let a = vesper_core::models::Fact::new("default", entity.id, "location", "Berlin");
        let b = vesper_core::models::Fact::new("default", entity.id, "location", "Lisbon");
        store.upsert_fact(&a).unwrap();
        store.upsert_fact(&b).unwrap();

        let detector = ConflictDetector::new(&DecayConfig::default());
        detector.detect_for_entity(&store, "default", entity.id).unwrap();

        let facts = store.list_facts("default", entity.id).unwrap();
        assert!(facts.iter().all(|f| f.confidence <= 0.5));
    }
}
