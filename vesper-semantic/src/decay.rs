//! Temporal decay: on every consolidation pass, every
//! relationship's strength decays exponentially toward zero since its last
//! reinforcement. `Δdays=0` is a strict no-op (invariant).

use chrono::Utc;
use vesper_core::config::DecayConfig;
use vesper_core::{GraphStore, VesperResult};

/// Apply temporal decay to every relationship in `namespace`. Returns the
/// number of relationships touched.
pub fn apply_decay(store: &dyn GraphStore, namespace: &str, config: &DecayConfig) -> VesperResult<usize> {
    let now = Utc::now();
    let relationships = store.list_relationships(namespace)?;
    let mut touched = 0;

    for mut rel in relationships {
        let elapsed_days = (now - rel.last_reinforced).num_seconds() as f64 / 86_400.0;
        if elapsed_days <= 0.0 {
            continue;
        }
        let half_life = config
            .half_life_overrides
            .get(&rel.relation_type)
            .copied()
            .unwrap_or(config.half_life_days);
        rel.decay(half_life, elapsed_days);
        store.upsert_relationship(&rel)?;
        touched += 1;
    }

    tracing::debug!(namespace, touched, "vesper-semantic: decay pass complete");
    Ok(touched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_storage::StorageEngine;

    #[test]
    fn zero_elapsed_time_is_noop() {
        let store = StorageEngine::open_in_memory().unwrap();
        let mut rel = vesper_core::models::Relationship::new(
            "default",
            uuid::Uuid::new_v4(),
            uuid::Uuid::new_v4(),
            "uses",
            "conv-1",
        );
        rel.strength = 0.8;
        store.upsert_relationship(&rel).unwrap();

        apply_decay(&store, "default", &DecayConfig::default()).unwrap();

        let reloaded = store
            .get_relationship("default", rel.source_id, rel.target_id, "uses")
            .unwrap()
            .unwrap();
        assert!((reloaded.strength - 0.8).abs() < 1e-6);
    }
}
