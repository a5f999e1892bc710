//! Pull a candidate entity name out of free-text query for the `factual`,
//! `temporal`, and `project` dispatch paths, and resolve it against the
//! Semantic Tier regardless of which `EntityType` it was filed under.
//!
//! The same capitalized-run heuristic as consolidation's entity extraction
//! (runs of capitalized words), but here we only need the single longest
//! candidate rather than every mention.

use std::sync::OnceLock;

use regex::Regex;
use vesper_core::models::{Entity, EntityType};
use vesper_core::{GraphStore, VesperResult};

fn capitalized_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Z][a-zA-Z0-9]*(?:\s+[A-Z][a-zA-Z0-9]*)*)\b").unwrap())
}

/// The longest capitalized run in `query`, or `None` if there isn't one.
pub fn extract_candidate_name(query: &str) -> Option<String> {
    capitalized_run_re()
        .find_iter(query)
        .map(|m| m.as_str().to_string())
        .max_by_key(|s| s.len())
}

/// `Entity.name` is only unique within a `(namespace, entity_type)` pair
///, so a router that doesn't know the type ahead of time tries
/// them in the order consolidation actually produces them: `Concept` is the
/// default extraction type, `Preference`/`Person`/`Project` are the
/// specialized ones.
pub fn find_entity_by_name(store: &dyn GraphStore, namespace: &str, name: &str) -> VesperResult<Option<Entity>> {
    for entity_type in [EntityType::Concept, EntityType::Preference, EntityType::Person, EntityType::Project] {
        if let Some(entity) = store.get_entity_by_name(namespace, name, entity_type)? {
            return Ok(Some(entity));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_longest_capitalized_run() {
        let name = extract_candidate_name("what is the status of the Drift Memory Project today");
        assert_eq!(name.as_deref(), Some("Drift Memory Project"));
    }

    #[test]
    fn returns_none_when_nothing_capitalized() {
        assert_eq!(extract_candidate_name("what is going on"), None);
    }
}
