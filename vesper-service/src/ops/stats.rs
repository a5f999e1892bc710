//! `get_stats` / `namespace_stats`: aggregate counts across the
//! graph store and the vector index. `GraphStore` has no single
//! "all facts in a namespace" query, so facts are summed per entity across
//! every `EntityType`.

use vesper_core::models::EntityType;
use vesper_core::{ErrorKind, GraphStore, VectorIndex, VesperResult};

use crate::types::StatsResult;

const ENTITY_TYPES: [EntityType; 4] =
    [EntityType::Person, EntityType::Project, EntityType::Concept, EntityType::Preference];

pub fn compute(store: &dyn GraphStore, vector: &dyn VectorIndex, collection: &str, namespace: &str) -> VesperResult<StatsResult> {
    let mut entities = 0u64;
    let mut facts = 0u64;
    for entity_type in ENTITY_TYPES {
        let rows = store.list_entities_by_type(namespace, entity_type)?;
        entities += rows.len() as u64;
        for entity in &rows {
            facts += store.list_facts(namespace, entity.id)?.len() as u64;
        }
    }

    let relationships = store.list_relationships(namespace)?.len() as u64;
    let conflicts = store.list_conflicts(namespace)?.len() as u64;
    let skills = store.list_skills(namespace, None)?.len() as u64;
    let points = match vector.stats(collection) {
        Ok(s) => s.points,
        Err(err) if err.kind() == ErrorKind::NotFound => 0,
        Err(err) => return Err(err),
    };

    Ok(StatsResult { points, entities, relationships, facts, conflicts, skills })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use uuid::Uuid;
    use vesper_core::models::EntityType as ET;
    use vesper_core::{VectorHit, VectorStats};
    use vesper_storage::StorageEngine;

    struct EmptyVectorIndex;
    impl VectorIndex for EmptyVectorIndex {
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
            Ok(VectorStats { points: 3, indexed: 3 })
        }
    }

    #[test]
    fn counts_entities_and_facts_across_all_entity_types() {
        let store = StorageEngine::open_in_memory().unwrap();
        let vector = EmptyVectorIndex;

        let alice = store.get_entity("default", Uuid::nil()).unwrap();
        assert!(alice.is_none());

        let entity = vesper_core::models::Entity::new("default", "Alice", ET::Person);
        store.upsert_entity(&entity).unwrap();
        store.upsert_fact(&vesper_core::models::Fact::new("default", entity.id, "likes", "coffee")).unwrap();

        let stats = compute(&store, &vector, "mem", "default").unwrap();
        assert_eq!(stats.entities, 1);
        assert_eq!(stats.facts, 1);
        assert_eq!(stats.points, 3);
    }
}
