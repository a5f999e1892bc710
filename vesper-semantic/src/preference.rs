//! Preference lookup: a direct, non-PPR path for the
//! router's `preference` query class. Ranks `EntityType::Preference`
//! entities matching a topic by confidence weighted by temporal decay of
//! their most recent fact.

use vesper_core::constants::DECAY_HALF_LIFE_DAYS;
use vesper_core::models::{Entity, EntityType, Fact};
use vesper_core::{GraphStore, VesperResult};

#[derive(Debug, Clone)]
pub struct PreferenceHit {
    pub entity: Entity,
    pub facts: Vec<Fact>,
    pub score: f64,
}

/// Look up preference entities whose name contains `topic` (case-insensitive),
/// ranked by `confidence * temporal_decay(most_recent_fact)`.
pub fn preference_query(store: &dyn GraphStore, namespace: &str, topic: &str) -> VesperResult<Vec<PreferenceHit>> {
    let topic_lower = topic.to_lowercase();
    let candidates = store.list_entities_by_type(namespace, EntityType::Preference)?;

    let mut hits = Vec::new();
    for entity in candidates {
        if !entity.name.to_lowercase().contains(&topic_lower) {
            continue;
        }
        let facts = store.list_facts(namespace, entity.id)?;
        let most_recent = facts.iter().filter_map(|f| f.valid_from).max();
        let recency = match most_recent {
            Some(ts) => {
                let age_days = (chrono::Utc::now() - ts).num_seconds().max(0) as f64 / 86_400.0;
                (-age_days / DECAY_HALF_LIFE_DAYS).exp()
            }
            None => 1.0,
        };
        let score = entity.confidence * recency;
        hits.push(PreferenceHit { entity, facts, score });
    }

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_storage::StorageEngine;

    #[test]
    fn matches_by_substring_case_insensitive() {
        let store = StorageEngine::open_in_memory().unwrap();
        let entity = Entity::new("default", "Editor Theme", EntityType::Preference);
        store.upsert_entity(&entity).unwrap();

        let hits = preference_query(&store, "default", "editor").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity.name, "Editor Theme");
    }

    #[test]
    fn non_matching_topic_returns_empty() {
        let store = StorageEngine::open_in_memory().unwrap();
        let entity = Entity::new("default", "Editor Theme", EntityType::Preference);
        store.upsert_entity(&entity).unwrap();

        let hits = preference_query(&store, "default", "cuisine").unwrap();
        assert!(hits.is_empty());
    }
}
