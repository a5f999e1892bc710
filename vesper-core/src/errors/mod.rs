//! Error taxonomy. Every subsystem has its own error enum;
//! `VesperError` wraps them behind the stable `ErrorKind` surface the
//! transport layer and callers actually branch on.

mod embedding_error;
mod kind;
mod semantic_error;
mod skill_error;
mod storage_error;
mod vector_error;
mod working_error;

pub use embedding_error::EmbeddingError;
pub use kind::ErrorKind;
pub use semantic_error::SemanticError;
pub use skill_error::SkillError;
pub use storage_error::StorageError;
pub use vector_error::VectorError;
pub use working_error::WorkingError;

/// The top-level error type returned by every fallible Vesper operation.
#[derive(Debug, thiserror::Error)]
pub enum VesperError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Vector(#[from] VectorError),

    #[error(transparent)]
    Working(#[from] WorkingError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Skill(#[from] SkillError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("cancelled")]
    Cancelled,

    #[error("internal error: {0}")]
    Internal(String),
}

impl VesperError {
    /// Map this error onto the shared error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VesperError::Storage(e) => match e {
                StorageError::NotFound { .. } => ErrorKind::NotFound,
                StorageError::UniqueViolation { .. } => ErrorKind::Conflict,
                StorageError::InvalidInput { .. } => ErrorKind::InvalidInput,
                StorageError::ConnectionPoolExhausted { .. } => ErrorKind::Unavailable,
                StorageError::SqliteError { .. } | StorageError::MigrationFailed { .. } => {
                    ErrorKind::Internal
                }
            },
            VesperError::Embedding(e) => match e {
                EmbeddingError::Unavailable { .. } => ErrorKind::Unavailable,
                EmbeddingError::Timeout { .. } => ErrorKind::Timeout,
                EmbeddingError::EmptyInput => ErrorKind::InvalidInput,
                EmbeddingError::DimensionMismatch { .. }
                | EmbeddingError::MalformedResponse { .. } => ErrorKind::Internal,
            },
            VesperError::Vector(e) => match e {
                VectorError::Unavailable { .. } => ErrorKind::Unavailable,
                VectorError::CollectionNotFound { .. } | VectorError::PointNotFound { .. } => {
                    ErrorKind::NotFound
                }
                VectorError::InvalidCollectionName { .. }
                | VectorError::DimensionMismatch { .. }
                | VectorError::InvalidPointId { .. } => ErrorKind::InvalidInput,
            },
            VesperError::Working(e) => match e {
                WorkingError::NotFound { .. } => ErrorKind::NotFound,
                WorkingError::Unavailable { .. } => ErrorKind::Unavailable,
            },
            VesperError::Semantic(e) => match e {
                SemanticError::EntityNotFound { .. } | SemanticError::FactNotFound { .. } => {
                    ErrorKind::NotFound
                }
                SemanticError::RelationshipExists { .. } => ErrorKind::Conflict,
                SemanticError::SelfRelationship { .. }
                | SemanticError::InvalidEntityType { .. }
                | SemanticError::EmptySeedSet => ErrorKind::InvalidInput,
            },
            VesperError::Skill(e) => match e {
                SkillError::NotFound { .. } => ErrorKind::NotFound,
                SkillError::DuplicateName { .. } => ErrorKind::Conflict,
                SkillError::RelationalVectorUnavailable { .. } => ErrorKind::NotFound,
                SkillError::TooManyTriggers { .. } => ErrorKind::InvalidInput,
            },
            VesperError::InvalidInput(_) => ErrorKind::InvalidInput,
            VesperError::NotFound(_) => ErrorKind::NotFound,
            VesperError::Conflict(_) => ErrorKind::Conflict,
            VesperError::Cancelled => ErrorKind::Cancelled,
            VesperError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether a caller should retry this operation.
    pub fn retryable(&self) -> bool {
        self.kind().retryable()
    }

    /// A short, user-facing message with no stack trace.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

pub type VesperResult<T> = Result<T, VesperError>;
