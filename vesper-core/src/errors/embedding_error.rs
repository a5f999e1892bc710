/// Embedding Client errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding service unreachable: {reason}")]
    Unavailable { reason: String },

    #[error("embedding request timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("empty text cannot be embedded")]
    EmptyInput,

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("malformed response from embedding service: {reason}")]
    MalformedResponse { reason: String },
}
