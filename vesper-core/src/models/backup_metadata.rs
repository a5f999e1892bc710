use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record emitted at the end of each consolidation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupMetadata {
    pub id: uuid::Uuid,
    pub namespace: String,
    pub backup_timestamp: DateTime<Utc>,
    pub backup_type: BackupType,
    pub status: String,
    pub memory_count: u64,
    pub entity_count: u64,
    pub relationship_count: u64,
    pub expires_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupType {
    Consolidation,
    Manual,
}
