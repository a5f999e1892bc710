//! Entity CRUD. Entities are created on first mention and
//! never deleted directly — pruning only acts on relationships and facts.

use vesper_core::models::{Entity, EntityType};
use vesper_core::{GraphStore, VesperResult};

/// Find an entity by `(namespace, name, type)`, creating it if absent.
/// Touches `access_count`/`last_accessed` when the entity already exists.
pub fn get_or_create(
    store: &dyn GraphStore,
    namespace: &str,
    name: &str,
    entity_type: EntityType,
) -> VesperResult<Entity> {
    if let Some(mut existing) = store.get_entity_by_name(namespace, name, entity_type)? {
        store.touch_entity(namespace, existing.id)?;
        existing.touch();
        return Ok(existing);
    }
    let entity = Entity::new(namespace, name, entity_type);
    store.upsert_entity(&entity)
}
