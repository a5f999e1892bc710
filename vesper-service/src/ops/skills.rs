//! `load_skill` / `record_skill_outcome`: thin wrappers
//! over `SkillLibrary` that translate a missing skill into `NotFound` and
//! surface the recomputed quality score after an outcome.

use vesper_core::models::Skill;
use vesper_core::{VesperError, VesperResult};
use vesper_skills::SkillLibrary;

use crate::types::SkillOutcomeResult;

pub fn load(skills: &SkillLibrary, namespace: &str, skill_id: uuid::Uuid) -> VesperResult<Skill> {
    skills
        .load_full(namespace, skill_id)?
        .ok_or_else(|| VesperError::NotFound(format!("skill {skill_id} not found in namespace {namespace}")))
}

pub fn record_outcome(
    skills: &SkillLibrary,
    namespace: &str,
    skill_id: uuid::Uuid,
    success: bool,
    satisfaction: Option<f64>,
) -> VesperResult<SkillOutcomeResult> {
    let skill = if success {
        skills.record_success(namespace, skill_id, satisfaction)?
    } else {
        skills.record_failure(namespace, skill_id)?
    };
    Ok(SkillOutcomeResult { quality_score: skill.quality_score() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vesper_core::config::SkillConfig;
    use vesper_core::GraphStore;
    use vesper_storage::StorageEngine;

    fn library() -> (SkillLibrary, Skill) {
        let store: Arc<dyn GraphStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
        let skill = Skill::new("default", "deploy", "short summary", "full description", "ops");
        store.upsert_skill(&skill).unwrap();
        (SkillLibrary::new(store, SkillConfig::default()), skill)
    }

    #[test]
    fn load_returns_not_found_for_an_unknown_skill() {
        let (skills, _) = library();
        let err = load(&skills, "default", uuid::Uuid::new_v4()).unwrap_err();
        assert_eq!(err.kind(), vesper_core::ErrorKind::NotFound);
    }

    #[test]
    fn recording_success_raises_the_quality_score() {
        let (skills, skill) = library();
        let before = load(&skills, "default", skill.id).unwrap().quality_score();
        let after = record_outcome(&skills, "default", skill.id, true, Some(0.95)).unwrap();
        assert!(after.quality_score >= before);
    }
}
