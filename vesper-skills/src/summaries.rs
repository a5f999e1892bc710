//! Lazy loading: lightweight summary rows for injection into a
//! query context, with the full record fetched only on demand.

use vesper_core::models::Skill;
use vesper_core::{GraphStore, VesperResult};

/// A ≈50-token row suitable for cheap injection into a prompt.
#[derive(Debug, Clone)]
pub struct SkillSummary {
    pub id: uuid::Uuid,
    pub name: String,
    pub summary: String,
    pub category: String,
    pub quality_score: f64,
}

impl From<&Skill> for SkillSummary {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name.clone(),
            summary: skill.summary.clone(),
            category: skill.category.clone(),
            quality_score: skill.quality_score(),
        }
    }
}

/// Ranked `quality_score DESC, avg_user_satisfaction DESC, success_count DESC`.
pub fn summaries(store: &dyn GraphStore, namespace: &str, limit: usize, category: Option<&str>) -> VesperResult<Vec<SkillSummary>> {
    let mut skills = store.list_skills(namespace, category)?;
    skills.retain(|s| !s.is_archived);
    skills.sort_by(|a, b| {
        b.quality_score()
            .partial_cmp(&a.quality_score())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.avg_user_satisfaction.partial_cmp(&a.avg_user_satisfaction).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| b.success_count.cmp(&a.success_count))
    });
    skills.truncate(limit);
    Ok(skills.iter().map(SkillSummary::from).collect())
}

/// Fetch the full record by id (`load_full`).
pub fn load_full(store: &dyn GraphStore, namespace: &str, skill_id: uuid::Uuid) -> VesperResult<Option<Skill>> {
    store.get_skill(namespace, skill_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_storage::StorageEngine;

    #[test]
    fn ranks_by_quality_then_satisfaction_then_success() {
        let store = StorageEngine::open_in_memory().unwrap();

        let mut strong = Skill::new("default", "strong", "s", "d", "general");
        strong.success_count = 10;
        strong.avg_user_satisfaction = 0.9;
        store.upsert_skill(&strong).unwrap();

        let mut weak = Skill::new("default", "weak", "s", "d", "general");
        weak.success_count = 1;
        weak.failure_count = 9;
        weak.avg_user_satisfaction = 0.2;
        store.upsert_skill(&weak).unwrap();

        let ranked = summaries(&store, "default", 10, None).unwrap();
        assert_eq!(ranked[0].name, "strong");
    }

    #[test]
    fn excludes_archived_skills() {
        let store = StorageEngine::open_in_memory().unwrap();
        let mut archived = Skill::new("default", "old", "s", "d", "general");
        archived.is_archived = true;
        store.upsert_skill(&archived).unwrap();

        let ranked = summaries(&store, "default", 10, None).unwrap();
        assert!(ranked.is_empty());
    }
}
