/// Graph store (SQLite-backed semantic tier) errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("unique constraint violated: {entity} ({detail})")]
    UniqueViolation { entity: String, detail: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("connection pool exhausted: {active_connections} active connections")]
    ConnectionPoolExhausted { active_connections: usize },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}
