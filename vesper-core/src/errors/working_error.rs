/// Working Tier errors.
#[derive(Debug, thiserror::Error)]
pub enum WorkingError {
    #[error("conversation not found: {id}")]
    NotFound { id: String },

    #[error("remote working-tier backend unreachable: {reason}")]
    Unavailable { reason: String },
}
