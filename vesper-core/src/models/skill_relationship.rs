use serde::{Deserialize, Serialize};

/// Co-occurrence edge between two skills.
///
/// `skill_id_1`/`skill_id_2` are always stored in canonical order (the
/// smaller UUID first) so `(skill_id_1, skill_id_2, relationship_type)` is
/// unique regardless of which skill was "first" in a given query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillRelationship {
    pub skill_id_1: uuid::Uuid,
    pub skill_id_2: uuid::Uuid,
    pub relationship_type: String,
    pub co_occurrence_count: u32,
    /// `emb(skill_2) - emb(skill_1)`, materialized lazily once
    /// `co_occurrence_count >= threshold`.
    pub relational_vector: Option<Vec<f32>>,
}

impl SkillRelationship {
    /// Canonicalize an unordered skill pair: smaller id first.
    pub fn canonical_pair(a: uuid::Uuid, b: uuid::Uuid) -> (uuid::Uuid, uuid::Uuid) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn new(a: uuid::Uuid, b: uuid::Uuid, relationship_type: impl Into<String>) -> Self {
        let (skill_id_1, skill_id_2) = Self::canonical_pair(a, b);
        Self {
            skill_id_1,
            skill_id_2,
            relationship_type: relationship_type.into(),
            co_occurrence_count: 0,
            relational_vector: None,
        }
    }
}
