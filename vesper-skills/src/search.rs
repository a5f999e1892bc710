//! Embedding, hybrid, and analogical (relational) search over the skill
//! library. Hybrid search fuses trigger-substring matches with
//! embedding-ranked matches via reciprocal rank fusion.

use std::collections::HashMap;

use vesper_core::constants::RRF_K;
use vesper_core::models::Skill;
use vesper_core::vector_math::{cosine_similarity, rrf_score};
use vesper_core::{Deadline, GraphStore, VesperResult};

#[derive(Debug, Clone)]
pub struct SkillHit {
    pub skill: Skill,
    pub score: f64,
}

/// Cosine-ranked search against each skill's `embedding`.
/// Skills with no embedding yet are skipped.
pub fn search_by_embedding(store: &dyn GraphStore, namespace: &str, query_embedding: &[f32], limit: usize) -> VesperResult<Vec<SkillHit>> {
    let skills = store.list_skills(namespace, None)?;
    let mut hits: Vec<SkillHit> = skills
        .into_iter()
        .filter(|s| !s.is_archived)
        .filter_map(|s| {
            let score = cosine_similarity(s.embedding.as_deref().unwrap_or(&[]), query_embedding);
            (score > 0.0).then_some(SkillHit { skill: s, score })
        })
        .collect();
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(limit);
    Ok(hits)
}

/// Fuse trigger-substring matches with embedding-ranked matches via RRF
/// (k=60, Glossary). Checks `deadline` before each store round-trip.
pub fn hybrid_search(
    store: &dyn GraphStore,
    namespace: &str,
    query: &str,
    query_embedding: &[f32],
    limit: usize,
    deadline: Deadline,
) -> VesperResult<Vec<SkillHit>> {
    deadline.check()?;
    let skills = store.list_skills(namespace, None)?;
    let query_lower = query.to_lowercase();

    let mut trigger_ranked: Vec<&Skill> = skills
        .iter()
        .filter(|s| !s.is_archived)
        .filter(|s| s.triggers.iter().any(|t| !t.is_empty() && query_lower.contains(&t.to_lowercase())))
        .collect();
    trigger_ranked.sort_by(|a, b| b.quality_score().partial_cmp(&a.quality_score()).unwrap_or(std::cmp::Ordering::Equal));

    deadline.check()?;
    let embedding_hits = search_by_embedding(store, namespace, query_embedding, skills.len().max(1))?;

    let mut fused: HashMap<uuid::Uuid, (f64, Skill)> = HashMap::new();
    for (rank, skill) in trigger_ranked.iter().enumerate() {
        let entry = fused.entry(skill.id).or_insert_with(|| (0.0, (*skill).clone()));
        entry.0 += rrf_score(rank, RRF_K as f64);
    }
    for (rank, hit) in embedding_hits.iter().enumerate() {
        let entry = fused.entry(hit.skill.id).or_insert_with(|| (0.0, hit.skill.clone()));
        entry.0 += rrf_score(rank, RRF_K as f64);
    }

    let mut hits: Vec<SkillHit> = fused.into_values().map(|(score, skill)| SkillHit { skill, score }).collect();
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(limit);
    Ok(hits)
}

/// Analogical search: given `a, b, c`, find the skill closest to
/// `emb(c) + (emb(b) - emb(a))`, excluding `a`, `b`, `c` themselves. Requires
/// all three embeddings to be present; otherwise returns an empty result
/// rather than erroring, since "no analogy available" is a valid outcome.
pub fn relational_search(
    store: &dyn GraphStore,
    namespace: &str,
    a: uuid::Uuid,
    b: uuid::Uuid,
    c: uuid::Uuid,
) -> VesperResult<Vec<SkillHit>> {
    let (skill_a, skill_b, skill_c) = (store.get_skill(namespace, a)?, store.get_skill(namespace, b)?, store.get_skill(namespace, c)?);
    let (Some(skill_a), Some(skill_b), Some(skill_c)) = (skill_a, skill_b, skill_c) else {
        return Ok(Vec::new());
    };
    let (Some(emb_a), Some(emb_b), Some(emb_c)) = (&skill_a.embedding, &skill_b.embedding, &skill_c.embedding) else {
        return Ok(Vec::new());
    };
    if emb_a.len() != emb_b.len() || emb_b.len() != emb_c.len() {
        return Ok(Vec::new());
    }

    let target: Vec<f32> = emb_c.iter().zip(emb_b.iter()).zip(emb_a.iter()).map(|((c, b), a)| c + (b - a)).collect();
    let excluded = [a, b, c];

    let skills = store.list_skills(namespace, None)?;
    let mut hits: Vec<SkillHit> = skills
        .into_iter()
        .filter(|s| !excluded.contains(&s.id) && !s.is_archived)
        .filter_map(|s| {
            let score = cosine_similarity(s.embedding.as_deref().unwrap_or(&[]), &target);
            (score > 0.0).then_some(SkillHit { skill: s, score })
        })
        .collect();
    hits.sort_by(|x, y| y.score.partial_cmp(&x.score).unwrap_or(std::cmp::Ordering::Equal));
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_storage::StorageEngine;

    fn skill_with_embedding(name: &str, embedding: Vec<f32>) -> Skill {
        let mut s = Skill::new("default", name, "s", "d", "general");
        s.embedding = Some(embedding);
        s
    }

    #[test]
    fn search_by_embedding_ranks_closest_first() {
        let store = StorageEngine::open_in_memory().unwrap();
        store.upsert_skill(&skill_with_embedding("close", vec![1.0, 0.0])).unwrap();
        store.upsert_skill(&skill_with_embedding("far", vec![0.0, 1.0])).unwrap();

        let hits = search_by_embedding(&store, "default", &[1.0, 0.0], 10).unwrap();
        assert_eq!(hits[0].skill.name, "close");
    }

    #[test]
    fn relational_search_requires_all_three_embeddings() {
        let store = StorageEngine::open_in_memory().unwrap();
        let a = Skill::new("default", "a", "s", "d", "general");
        let b = Skill::new("default", "b", "s", "d", "general");
        let c = skill_with_embedding("c", vec![1.0, 0.0]);
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        store.upsert_skill(&a).unwrap();
        store.upsert_skill(&b).unwrap();
        store.upsert_skill(&c).unwrap();

        let hits = relational_search(&store, "default", a_id, b_id, c_id).unwrap();
        assert!(hits.is_empty());
    }
}
