use serde::{Deserialize, Serialize};

use super::reporter::HealthSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub message: String,
    pub action: String,
}

/// Actionable advice derived from a health snapshot, separate from the pass/
/// fail verdict a [`super::HealthReport`] carries.
pub fn generate(snapshot: &HealthSnapshot) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if !snapshot.embedding_healthy {
        recs.push(Recommendation {
            severity: Severity::Warning,
            message: "embedding service is unreachable".to_string(),
            action: "check EMBEDDING_URL and the embedding service's own health endpoint".to_string(),
        });
    }

    if !snapshot.vector_healthy {
        recs.push(Recommendation {
            severity: Severity::Critical,
            message: "vector index is unreachable".to_string(),
            action: "check VECTOR_URL; stores are failing until this recovers".to_string(),
        });
    }

    if snapshot.open_conflicts > 0 {
        let severity = if snapshot.open_conflicts > 20 { Severity::Warning } else { Severity::Info };
        recs.push(Recommendation {
            severity,
            message: format!("{} conflicts are open", snapshot.open_conflicts),
            action: "review conflicting fact pairs; the detector never auto-resolves them".to_string(),
        });
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_healthy_snapshot_yields_no_recommendations() {
        let snapshot = HealthSnapshot { embedding_healthy: true, vector_healthy: true, open_conflicts: 0, ..Default::default() };
        assert!(generate(&snapshot).is_empty());
    }

    #[test]
    fn open_conflicts_produce_a_recommendation() {
        let snapshot = HealthSnapshot { embedding_healthy: true, vector_healthy: true, open_conflicts: 3, ..Default::default() };
        let recs = generate(&snapshot);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].severity, Severity::Info);
    }
}
