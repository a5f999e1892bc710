//! Per-class dispatch: each `QueryClass` other than the fast
//! path has its own handler, all returning the same merged result shape.

use std::collections::HashMap;

use vesper_core::constants::RRF_K;
use vesper_core::models::{Provenance, RetrievedResult};
use vesper_core::vector_math::rrf_score;
use vesper_core::{Deadline, EmbeddingClient, GraphStore, VectorIndex, VesperResult};
use vesper_semantic::SemanticTier;
use vesper_skills::SkillLibrary;
use vesper_working::WorkingTier;

use crate::entity_lookup;

/// `preference` → direct lookup with temporal-decay re-rank.
pub fn preference(semantic: &SemanticTier, namespace: &str, query: &str) -> VesperResult<Vec<RetrievedResult>> {
    let topic = entity_lookup::extract_candidate_name(query).unwrap_or_else(|| query.to_string());
    let hits = semantic.preference_query(namespace, &topic)?;
    Ok(hits
        .into_iter()
        .map(|hit| RetrievedResult {
            id: hit.entity.id.to_string(),
            content: format!("{}: {}", hit.entity.name, summarize_facts(&hit.facts)),
            score: hit.score,
            source: Provenance::Semantic,
            path: None,
            matched_trigger: None,
        })
        .collect())
}

/// `factual` → entity lookup by extracted name + top facts.
pub fn factual(semantic: &SemanticTier, store: &dyn GraphStore, namespace: &str, query: &str) -> VesperResult<Vec<RetrievedResult>> {
    let Some(name) = entity_lookup::extract_candidate_name(query) else {
        return Ok(Vec::new());
    };
    let Some(entity) = entity_lookup::find_entity_by_name(store, namespace, &name)? else {
        return Ok(Vec::new());
    };
    let mut facts = semantic.list_facts(namespace, entity.id)?;
    facts.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(std::cmp::Ordering::Equal));

    Ok(facts
        .into_iter()
        .map(|fact| RetrievedResult {
            id: fact.id.to_string(),
            content: format!("{} {} = {}", entity.name, fact.property, fact.value),
            score: fact.confidence,
            source: Provenance::Semantic,
            path: None,
            matched_trigger: None,
        })
        .collect())
}

/// `project`/multi-hop → PPR-with-facts seeded from the extracted entity.
/// Falls back to an empty result (the caller then tries `complex`) when no
/// seed entity is found in the query.
pub fn project(
    semantic: &SemanticTier,
    store: &dyn GraphStore,
    namespace: &str,
    query: &str,
    limit: usize,
    deadline: Deadline,
) -> VesperResult<Vec<RetrievedResult>> {
    let Some(name) = entity_lookup::extract_candidate_name(query) else {
        return Ok(Vec::new());
    };
    let Some(seed) = entity_lookup::find_entity_by_name(store, namespace, &name)? else {
        return Ok(Vec::new());
    };

    let hits = semantic.personalized_page_rank_with_facts(namespace, &[seed.id], limit, 3, deadline)?;
    Ok(hits
        .into_iter()
        .map(|hit| RetrievedResult {
            id: hit.entity_id.to_string(),
            content: hit.facts.iter().map(|f| format!("{}={}", f.fact.property, f.fact.value)).collect::<Vec<_>>().join(", "),
            score: hit.score,
            source: Provenance::Semantic,
            path: hit.facts.first().map(|f| f.path.clone()),
            matched_trigger: None,
        })
        .collect())
}

/// `temporal` → bounded scan over the extracted entity's fact validity
/// intervals, most recently opened first.
pub fn temporal(semantic: &SemanticTier, store: &dyn GraphStore, namespace: &str, query: &str, limit: usize) -> VesperResult<Vec<RetrievedResult>> {
    let Some(name) = entity_lookup::extract_candidate_name(query) else {
        return Ok(Vec::new());
    };
    let Some(entity) = entity_lookup::find_entity_by_name(store, namespace, &name)? else {
        return Ok(Vec::new());
    };

    let mut facts = semantic.list_facts(namespace, entity.id)?;
    facts.sort_by(|a, b| b.valid_from.cmp(&a.valid_from));
    facts.truncate(limit);

    Ok(facts
        .into_iter()
        .map(|fact| RetrievedResult {
            id: fact.id.to_string(),
            content: format!("{} {} = {}", entity.name, fact.property, fact.value),
            score: fact.confidence,
            source: Provenance::Semantic,
            path: None,
            matched_trigger: None,
        })
        .collect())
}

/// `skill` → invocation detector first, hybrid search as a fallback.
pub fn skill(
    skills: &SkillLibrary,
    embedder: &dyn EmbeddingClient,
    namespace: &str,
    query: &str,
    limit: usize,
    deadline: Deadline,
) -> VesperResult<Vec<RetrievedResult>> {
    deadline.check()?;
    let invocation = skills.detect_invocation(namespace, query, None)?;
    if invocation.is_invocation {
        if let Some(skill_id) = invocation.skill_id {
            if let Some(skill) = skills.load_full(namespace, skill_id)? {
                return Ok(vec![RetrievedResult {
                    id: skill.id.to_string(),
                    content: skill.summary.clone(),
                    score: invocation.confidence,
                    source: Provenance::Skill,
                    path: None,
                    matched_trigger: invocation.matched_trigger,
                }]);
            }
        }
    }

    deadline.check()?;
    let embedding = embedder.embed(query).unwrap_or_default();
    let hits = skills.hybrid_search(namespace, query, &embedding, limit, deadline)?;
    Ok(hits
        .into_iter()
        .map(|hit| RetrievedResult {
            id: hit.skill.id.to_string(),
            content: hit.skill.summary.clone(),
            score: hit.score,
            source: Provenance::Skill,
            path: None,
            matched_trigger: hit.skill.triggers.first().cloned(),
        })
        .collect())
}

/// `complex` → hybrid search with RRF: the Vector Index's embedding ranking
/// fused with the Working Tier's cosine ranking over records already held
/// in memory, the same two-list-fused-via-`rrf_score` shape as
/// `vesper_skills::search::hybrid_search`.
pub fn complex(
    vector: &dyn VectorIndex,
    working: &WorkingTier,
    embedder: &dyn EmbeddingClient,
    namespace: &str,
    query: &str,
    limit: usize,
    deadline: Deadline,
) -> VesperResult<Vec<RetrievedResult>> {
    deadline.check()?;
    let embedding = embedder.embed(query)?;
    deadline.check()?;
    let vector_hits: Vec<_> = vector
        .search(vesper_core::constants::MEMORY_COLLECTION, &embedding, limit * 4)?
        .into_iter()
        .filter(|hit| hit.payload.get("namespace").and_then(|v| v.as_str()) == Some(namespace))
        .collect();
    deadline.check()?;
    let working_hits = working.search(namespace, query, limit * 4);

    let mut fused: HashMap<String, (f64, RetrievedResult)> = HashMap::new();
    for (rank, hit) in vector_hits.iter().enumerate() {
        let result = RetrievedResult {
            id: hit.id.to_string(),
            content: hit.payload.get("content").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
            score: hit.score,
            source: Provenance::Hybrid,
            path: None,
            matched_trigger: None,
        };
        let entry = fused.entry(result.id.clone()).or_insert_with(|| (0.0, result));
        entry.0 += rrf_score(rank, RRF_K as f64);
    }
    for (rank, (record, _similarity)) in working_hits.iter().enumerate() {
        let result = RetrievedResult {
            id: record.conversation_id.clone(),
            content: record.full_text.clone(),
            score: 0.0,
            source: Provenance::Hybrid,
            path: None,
            matched_trigger: None,
        };
        let entry = fused.entry(record.conversation_id.clone()).or_insert_with(|| (0.0, result));
        entry.0 += rrf_score(rank, RRF_K as f64);
    }

    let mut hits: Vec<RetrievedResult> = fused.into_values().map(|(score, result)| RetrievedResult { score, ..result }).collect();
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(limit);
    Ok(hits)
}

fn summarize_facts(facts: &[vesper_core::models::Fact]) -> String {
    facts.iter().map(|f| format!("{}={}", f.property, f.value)).collect::<Vec<_>>().join(", ")
}
