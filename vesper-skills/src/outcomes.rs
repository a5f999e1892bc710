//! Outcome tracking: `record_success`/`record_failure` update
//! skill counters; `quality_score` is always recomputed on read rather than
//! stored, so there is nothing to keep in sync here.

use vesper_core::errors::SkillError;
use vesper_core::models::Skill;
use vesper_core::{GraphStore, VesperResult};

pub fn record_success(store: &dyn GraphStore, namespace: &str, skill_id: uuid::Uuid, satisfaction: Option<f64>) -> VesperResult<Skill> {
    let mut skill = store
        .get_skill(namespace, skill_id)?
        .ok_or_else(|| SkillError::NotFound { id: skill_id.to_string() })?;
    skill.record_success(satisfaction);
    store.upsert_skill(&skill)
}

pub fn record_failure(store: &dyn GraphStore, namespace: &str, skill_id: uuid::Uuid) -> VesperResult<Skill> {
    let mut skill = store
        .get_skill(namespace, skill_id)?
        .ok_or_else(|| SkillError::NotFound { id: skill_id.to_string() })?;
    skill.record_failure();
    store.upsert_skill(&skill)
}
