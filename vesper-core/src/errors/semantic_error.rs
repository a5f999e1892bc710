/// Semantic Tier graph errors.
#[derive(Debug, thiserror::Error)]
pub enum SemanticError {
    #[error("entity not found: {id}")]
    EntityNotFound { id: String },

    #[error("relationship already exists: {source} -[{relation_type}]-> {target}")]
    RelationshipExists {
        source: String,
        target: String,
        relation_type: String,
    },

    #[error("self-referential relationship rejected: {id}")]
    SelfRelationship { id: String },

    #[error("fact not found: {id}")]
    FactNotFound { id: String },

    #[error("invalid entity type: {value}")]
    InvalidEntityType { value: String },

    #[error("seed entity set is empty")]
    EmptySeedSet,
}
