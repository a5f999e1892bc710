//! Fact CRUD. A property may carry multiple facts over time —
//! each call creates a new, distinctly-identified fact rather than
//! overwriting the previous one, so overlapping validity can be detected
//! as a conflict downstream (`vesper-conflict`).

use vesper_core::models::Fact;
use vesper_core::{GraphStore, VesperResult};

pub fn record_fact(
    store: &dyn GraphStore,
    namespace: &str,
    entity_id: uuid::Uuid,
    property: &str,
    value: &str,
    source_conversation: Option<String>,
) -> VesperResult<Fact> {
    let mut fact = Fact::new(namespace, entity_id, property, value);
    fact.source_conversation = source_conversation;
    store.upsert_fact(&fact)
}
