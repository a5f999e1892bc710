use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directed, weighted, decaying edge between two entities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    pub id: uuid::Uuid,
    pub namespace: String,
    pub source_id: uuid::Uuid,
    pub target_id: uuid::Uuid,
    pub relation_type: String,
    /// (0, 1]
    pub strength: f64,
    pub evidence: Vec<String>,
    /// Number of times this edge has been traversed or reinforced; pruning
    /// only drops edges below both a strength and access floor.
    pub access_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_reinforced: DateTime<Utc>,
}

impl Relationship {
    pub fn new(
        namespace: impl Into<String>,
        source_id: uuid::Uuid,
        target_id: uuid::Uuid,
        relation_type: impl Into<String>,
        evidence: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4(),
            namespace: namespace.into(),
            source_id,
            target_id,
            relation_type: relation_type.into(),
            strength: 1.0,
            evidence: vec![evidence.into()],
            access_count: 0,
            created_at: now,
            last_reinforced: now,
        }
    }

    /// Reinforce with new evidence: bump strength (capped at 1.0), record provenance.
    pub fn reinforce(&mut self, bump: f64, evidence: impl Into<String>) {
        self.strength = (self.strength + bump).min(1.0);
        self.evidence.push(evidence.into());
        self.access_count += 1;
        self.last_reinforced = Utc::now();
    }

    /// Apply exponential temporal decay for `elapsed_days` since `last_reinforced`.
    pub fn decay(&mut self, half_life_days: f64, elapsed_days: f64) {
        if elapsed_days <= 0.0 {
            return;
        }
        self.strength *= (-elapsed_days / half_life_days).exp();
        self.strength = self.strength.clamp(f64::MIN_POSITIVE, 1.0);
    }
}
