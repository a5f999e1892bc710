use super::reporter::{HealthSnapshot, HealthStatus, SubsystemHealth};

/// Threshold above which open conflicts are surfaced as a
/// degraded semantic tier — the detector never auto-resolves them, so a
/// growing backlog is an operator signal, not a bug.
const OPEN_CONFLICT_DEGRADED_THRESHOLD: u64 = 20;

pub struct SubsystemChecker;

impl SubsystemChecker {
    pub fn check_all(snapshot: &HealthSnapshot) -> Vec<SubsystemHealth> {
        vec![
            Self::check_embedding(snapshot),
            Self::check_vector(snapshot),
            Self::check_semantic(snapshot),
        ]
    }

    /// Embedding Client down is a degradation, not an outage:
    /// store paths proceed without an embedding and self-heal on the next
    /// consolidation pass.
    fn check_embedding(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.embedding_healthy {
            (HealthStatus::Healthy, None)
        } else {
            (HealthStatus::Degraded, Some("embedding service unreachable; writes proceed without embeddings".to_string()))
        };
        SubsystemHealth { name: "embedding".to_string(), status, message }
    }

    /// Vector Index down is unhealthy, not merely degraded: a failed upsert
    /// rolls back the graph write and returns `Unavailable` —
    /// stores genuinely fail, unlike a degraded embedding.
    fn check_vector(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.vector_healthy {
            (HealthStatus::Healthy, None)
        } else {
            (HealthStatus::Unhealthy, Some("vector index unreachable; stores will fail".to_string()))
        };
        SubsystemHealth { name: "vector_index".to_string(), status, message }
    }

    fn check_semantic(snapshot: &HealthSnapshot) -> SubsystemHealth {
        let (status, message) = if snapshot.open_conflicts > OPEN_CONFLICT_DEGRADED_THRESHOLD {
            (HealthStatus::Degraded, Some(format!("{} open conflicts awaiting resolution", snapshot.open_conflicts)))
        } else {
            (HealthStatus::Healthy, None)
        };
        SubsystemHealth { name: "semantic".to_string(), status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn many_open_conflicts_degrade_the_semantic_subsystem() {
        let snapshot = HealthSnapshot { open_conflicts: 50, ..Default::default() };
        let health = SubsystemChecker::check_semantic(&snapshot);
        assert_eq!(health.status, HealthStatus::Degraded);
    }

    #[test]
    fn a_few_open_conflicts_are_healthy() {
        let snapshot = HealthSnapshot { open_conflicts: 2, ..Default::default() };
        let health = SubsystemChecker::check_semantic(&snapshot);
        assert_eq!(health.status, HealthStatus::Healthy);
    }
}
