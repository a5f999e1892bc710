//! Relationship CRUD with reinforcement.

use vesper_core::errors::SemanticError;
use vesper_core::models::Relationship;
use vesper_core::{GraphStore, VesperResult};

/// Create or reinforce a directed edge. Rejects self-relationships. If the
/// edge already exists for `(source, target, relation_type)`, bumps its
/// strength by `reinforcement_bump` (capped at 1.0) and records the new
/// evidence rather than creating a duplicate row (uniqueness).
pub fn upsert_or_reinforce(
    store: &dyn GraphStore,
    namespace: &str,
    source_id: uuid::Uuid,
    target_id: uuid::Uuid,
    relation_type: &str,
    evidence: impl Into<String>,
    reinforcement_bump: f64,
) -> VesperResult<Relationship> {
    if source_id == target_id {
        return Err(SemanticError::SelfRelationship { id: source_id.to_string() }.into());
    }

    let evidence = evidence.into();
    match store.get_relationship(namespace, source_id, target_id, relation_type)? {
        Some(mut existing) => {
            existing.reinforce(reinforcement_bump, evidence);
            store.upsert_relationship(&existing)
        }
        None => {
            let rel = Relationship::new(namespace, source_id, target_id, relation_type, evidence);
            store.upsert_relationship(&rel)
        }
    }
}
