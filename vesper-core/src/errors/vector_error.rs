/// Vector Index errors.
#[derive(Debug, thiserror::Error)]
pub enum VectorError {
    #[error("vector index unreachable: {reason}")]
    Unavailable { reason: String },

    #[error("collection not found: {name}")]
    CollectionNotFound { name: String },

    #[error("invalid collection name: {name} (must match [A-Za-z0-9_-]{{1,64}})")]
    InvalidCollectionName { name: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid point id: {id} (must be a UUID)")]
    InvalidPointId { id: String },

    #[error("point not found: {id}")]
    PointNotFound { id: String },
}
