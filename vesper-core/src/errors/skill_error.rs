/// Procedural Tier / Skill Library errors.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("skill not found: {id}")]
    NotFound { id: String },

    #[error("skill name already registered in namespace: {name}")]
    DuplicateName { name: String },

    #[error("relational vector unavailable for pair ({a}, {b})")]
    RelationalVectorUnavailable { a: String, b: String },

    #[error("too many triggers: {count} (max 5)")]
    TooManyTriggers { count: usize },
}
