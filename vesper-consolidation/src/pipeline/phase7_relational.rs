//! Phase 7: recompute relational vectors gone stale since their embeddings
//! last changed.

use vesper_core::VesperResult;
use vesper_skills::SkillLibrary;

pub fn run(skills: &SkillLibrary, namespace: &str) -> VesperResult<usize> {
    skills.recompute_stale_relational_vectors(namespace)
}
