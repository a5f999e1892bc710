//! Phase 6: extract candidate skills from records that carry positive
//! feedback, and record co-occurrence between skills mentioned together in
//! the same record.
//!
//! There is no explicit "positive feedback" field on `ConversationRecord`;
//! this mirrors `extraction::extract_preference_phrases`'s approach of
//! flagging sentences by regex, here over a fixed feedback vocabulary
//! rather than a `SkillConfig`-level pattern, since the phrase list is
//! closer to a fixed lexicon than a tunable preference.

use std::sync::OnceLock;

use regex::Regex;
use vesper_core::models::{ConversationRecord, Skill};
use vesper_core::VesperResult;
use vesper_skills::SkillLibrary;

fn feedback_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(worked|helped|great|thanks|perfect|solved)\b").unwrap())
}

fn sentence_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+\s*").unwrap())
}

#[derive(Debug, Default)]
pub struct PhaseSixOutcome {
    pub skills_extracted: u64,
}

/// Scan `record.full_text` for feedback-bearing sentences; each of the
/// record's `key_entities` becomes (or reinforces) a skill named after it,
/// then every pair of skills touched by this record has their
/// co-occurrence bumped.
pub fn process_record(skills: &SkillLibrary, namespace: &str, record: &ConversationRecord) -> VesperResult<PhaseSixOutcome> {
    let mut outcome = PhaseSixOutcome::default();

    if record.key_entities.is_empty() {
        return Ok(outcome);
    }
    if !sentence_split_re().split(&record.full_text).any(|s| feedback_re().is_match(s)) {
        return Ok(outcome);
    }

    let mut skill_ids = Vec::with_capacity(record.key_entities.len());
    for name in &record.key_entities {
        let id = match skills.find_by_name(namespace, name)? {
            Some(existing) => existing.id,
            None => {
                let summary = format!("Approach involving {name}");
                let description = format!(
                    "Extracted from a conversation where {name} was discussed and the outcome was reported as positive."
                );
                let mut new_skill = Skill::new(namespace, name, summary, description, "general");
                new_skill.triggers.push(name.to_lowercase());
                let registered = skills.register(&new_skill)?;
                outcome.skills_extracted += 1;
                registered.id
            }
        };
        skill_ids.push(id);
    }

    for i in 0..skill_ids.len() {
        for j in (i + 1)..skill_ids.len() {
            skills.record_cooccurrence(namespace, skill_ids[i], skill_ids[j])?;
        }
    }

    Ok(outcome)
}

pub fn run(skills: &SkillLibrary, namespace: &str, records: &[ConversationRecord]) -> VesperResult<PhaseSixOutcome> {
    let mut outcome = PhaseSixOutcome::default();
    for record in records {
        let per_record = process_record(skills, namespace, record)?;
        outcome.skills_extracted += per_record.skills_extracted;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vesper_core::config::SkillConfig;
    use vesper_core::GraphStore;
    use vesper_storage::StorageEngine;

    #[test]
    fn registers_skill_from_feedback_bearing_record() {
        let store: Arc<dyn GraphStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
        let skills = SkillLibrary::new(store, SkillConfig::default());

        let mut record = ConversationRecord::new("default", "Using Drift Project really helped, it worked great.");
        record.key_entities.insert("Drift Project".to_string());

        let outcome = process_record(&skills, "default", &record).unwrap();
        assert_eq!(outcome.skills_extracted, 1);
        assert!(skills.find_by_name("default", "Drift Project").unwrap().is_some());
    }

    #[test]
    fn skips_records_without_feedback_language() {
        let store: Arc<dyn GraphStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
        let skills = SkillLibrary::new(store, SkillConfig::default());

        let mut record = ConversationRecord::new("default", "We discussed the Drift Project roadmap.");
        record.key_entities.insert("Drift Project".to_string());

        let outcome = process_record(&skills, "default", &record).unwrap();
        assert_eq!(outcome.skills_extracted, 0);
    }

    #[test]
    fn reinforces_existing_skill_instead_of_duplicating() {
        let store: Arc<dyn GraphStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
        let skills = SkillLibrary::new(store, SkillConfig::default());

        let mut record = ConversationRecord::new("default", "Drift Project helped a lot, thanks!");
        record.key_entities.insert("Drift Project".to_string());
        process_record(&skills, "default", &record).unwrap();

        let outcome = process_record(&skills, "default", &record).unwrap();
        assert_eq!(outcome.skills_extracted, 0);
        assert_eq!(skills.summaries("default", 10, None).unwrap().len(), 1);
    }
}
