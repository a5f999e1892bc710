//! Co-occurrence tracking: pairs normalized by id
//! ordering so `(skill_id_1, skill_id_2)` is unique regardless of which
//! skill triggered first.

use vesper_core::config::SkillConfig;
use vesper_core::models::SkillRelationship;
use vesper_core::{GraphStore, VesperResult};

/// Record a co-occurrence between two skills, bumping the count. Once the
/// count reaches `config.cooccurrence_threshold`, materializes
/// `relational_vector = emb(skill_2) - emb(skill_1)` if both skills have an
/// embedding.
pub fn record_cooccurrence(
    store: &dyn GraphStore,
    namespace: &str,
    skill_a: uuid::Uuid,
    skill_b: uuid::Uuid,
    config: &SkillConfig,
) -> VesperResult<SkillRelationship> {
    let (id1, id2) = SkillRelationship::canonical_pair(skill_a, skill_b);
    let mut rel = store.get_skill_relationship(id1, id2)?.unwrap_or_else(|| SkillRelationship::new(skill_a, skill_b, "co_occurs_with"));
    rel.co_occurrence_count += 1;

    if rel.co_occurrence_count >= config.cooccurrence_threshold && rel.relational_vector.is_none() {
        if let (Some(skill_1), Some(skill_2)) = (store.get_skill(namespace, rel.skill_id_1)?, store.get_skill(namespace, rel.skill_id_2)?) {
            if let (Some(e1), Some(e2)) = (&skill_1.embedding, &skill_2.embedding) {
                if e1.len() == e2.len() {
                    rel.relational_vector = Some(e2.iter().zip(e1.iter()).map(|(b, a)| b - a).collect());
                }
            }
        }
    }

    store.upsert_skill_relationship(&rel)
}

/// Recompute relational vectors for every skill pair that has reached the
/// co-occurrence threshold but whose embeddings changed since the vector
/// was last materialized (consolidation phase 7).
pub fn recompute_stale_relational_vectors(store: &dyn GraphStore, namespace: &str, config: &SkillConfig) -> VesperResult<usize> {
    let relationships = store.list_skill_relationships()?;
    let mut recomputed = 0;

    for rel in relationships {
        if rel.co_occurrence_count < config.cooccurrence_threshold {
            continue;
        }
        let (Some(skill_1), Some(skill_2)) = (store.get_skill(namespace, rel.skill_id_1)?, store.get_skill(namespace, rel.skill_id_2)?) else {
            continue;
        };
        let (Some(e1), Some(e2)) = (&skill_1.embedding, &skill_2.embedding) else { continue };
        if e1.len() != e2.len() {
            continue;
        }
        let vector: Vec<f32> = e2.iter().zip(e1.iter()).map(|(b, a)| b - a).collect();
        if rel.relational_vector.as_ref() != Some(&vector) {
            let mut updated = rel.clone();
            updated.relational_vector = Some(vector);
            store.upsert_skill_relationship(&updated)?;
            recomputed += 1;
        }
    }

    Ok(recomputed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::models::Skill;
    use vesper_storage::StorageEngine;

    #[test]
    fn materializes_relational_vector_once_threshold_reached() {
        let store = StorageEngine::open_in_memory().unwrap();
        let mut a = Skill::new("default", "a", "s", "d", "general");
        a.embedding = Some(vec![1.0, 0.0]);
        let mut b = Skill::new("default", "b", "s", "d", "general");
        b.embedding = Some(vec![0.0, 1.0]);
        store.upsert_skill(&a).unwrap();
        store.upsert_skill(&b).unwrap();

        let config = SkillConfig { cooccurrence_threshold: 2, ..SkillConfig::default() };
        record_cooccurrence(&store, "default", a.id, b.id, &config).unwrap();
        let second = record_cooccurrence(&store, "default", a.id, b.id, &config).unwrap();

        assert_eq!(second.co_occurrence_count, 2);
        assert!(second.relational_vector.is_some());
    }

    #[test]
    fn pair_is_order_independent() {
        let store = StorageEngine::open_in_memory().unwrap();
        let config = SkillConfig::default();
        let a = uuid::Uuid::new_v4();
        let b = uuid::Uuid::new_v4();

        record_cooccurrence(&store, "default", a, b, &config).unwrap();
        let rel = record_cooccurrence(&store, "default", b, a, &config).unwrap();
        assert_eq!(rel.co_occurrence_count, 2);
    }
}
