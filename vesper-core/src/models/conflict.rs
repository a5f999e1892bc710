use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable record of a detected inconsistency between two facts.
///
/// The detector never resolves conflicts automatically — `resolution_status`
/// starts at `Open` and can only move forward via an explicit caller action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conflict {
    pub id: uuid::Uuid,
    pub namespace: String,
    pub fact_id_1: uuid::Uuid,
    pub fact_id_2: uuid::Uuid,
    pub conflict_type: ConflictType,
    pub description: String,
    pub severity: Severity,
    pub resolution_status: ResolutionStatus,
    pub detected_at: DateTime<Utc>,
}

impl Conflict {
    pub fn new(
        namespace: impl Into<String>,
        fact_id_1: uuid::Uuid,
        fact_id_2: uuid::Uuid,
        conflict_type: ConflictType,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            namespace: namespace.into(),
            fact_id_1,
            fact_id_2,
            conflict_type,
            description: description.into(),
            severity,
            resolution_status: ResolutionStatus::Open,
            detected_at: Utc::now(),
        }
    }

    /// The unordered identity key used to enforce idempotent detection
    /// (`{fact_id_1, fact_id_2, conflict_type}` is unique).
    pub fn identity_key(&self) -> (uuid::Uuid, uuid::Uuid, ConflictType) {
        if self.fact_id_1 <= self.fact_id_2 {
            (self.fact_id_1, self.fact_id_2, self.conflict_type)
        } else {
            (self.fact_id_2, self.fact_id_1, self.conflict_type)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    Temporal,
    Contradiction,
    PreferenceShift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Open,
    Acknowledged,
    Superseded,
}
