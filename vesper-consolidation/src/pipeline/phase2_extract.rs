//! Phase 2: extract entities, relationships, and facts from each snapshotted
//! record. Per-record errors are caught and logged by the
//! caller, not here — this module is pure extraction-and-write.

use regex::Regex;
use vesper_core::models::{ConversationRecord, EntityType};
use vesper_core::VesperResult;
use vesper_semantic::SemanticTier;

use crate::extraction;

#[derive(Debug, Default)]
pub struct PhaseTwoOutcome {
    pub entities_extracted: u64,
    pub relationships_created: u64,
}

pub fn process_record(
    semantic: &SemanticTier,
    namespace: &str,
    record: &ConversationRecord,
    preference_pattern: &Regex,
) -> VesperResult<PhaseTwoOutcome> {
    let mut outcome = PhaseTwoOutcome::default();

    let names: Vec<String> = if record.key_entities.is_empty() {
        extraction::extract_key_entities(&record.full_text).into_iter().collect()
    } else {
        record.key_entities.iter().cloned().collect()
    };

    let mut entity_ids = Vec::with_capacity(names.len());
    for name in &names {
        let entity = semantic.get_or_create_entity(namespace, name, EntityType::Concept)?;
        entity_ids.push(entity.id);
        outcome.entities_extracted += 1;
    }

    let bump = semantic.reinforcement_bump_for(record.is_decision);
    for i in 0..entity_ids.len() {
        for j in (i + 1)..entity_ids.len() {
            semantic.upsert_or_reinforce_relationship_with_bump(
                namespace,
                entity_ids[i],
                entity_ids[j],
                "co_mentioned",
                record.conversation_id.clone(),
                bump,
            )?;
            outcome.relationships_created += 1;
        }
    }

    for phrase in extraction::extract_preference_phrases(&record.full_text, preference_pattern) {
        let topic = names.first().cloned().unwrap_or_else(|| phrase.chars().take(40).collect());
        let preference_entity = semantic.get_or_create_entity(namespace, &topic, EntityType::Preference)?;
        semantic.record_fact(namespace, preference_entity.id, "stated_preference", &phrase, Some(record.conversation_id.clone()))?;
        outcome.entities_extracted += 1;
    }

    Ok(outcome)
}
