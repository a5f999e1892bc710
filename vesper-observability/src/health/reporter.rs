use serde::{Deserialize, Serialize};

use super::recommendations::Recommendation;
use super::subsystem_checks::SubsystemChecker;

/// Point-in-time counts and probe results fed into [`HealthReporter::build`].
/// The caller (`vesper-service`, typically) assembles this from `get_stats`
/// plus a direct probe of the Embedding Client and Vector Index.
#[derive(Debug, Clone, Default)]
pub struct HealthSnapshot {
    pub points: u64,
    pub entities: u64,
    pub relationships: u64,
    pub facts: u64,
    pub conflicts: u64,
    pub open_conflicts: u64,
    pub skills: u64,
    pub working_tier_records: u64,
    pub embedding_healthy: bool,
    pub vector_healthy: bool,
    pub consolidation_runs: u64,
    pub last_consolidation_duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsystemHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall_status: HealthStatus,
    pub subsystems: Vec<SubsystemHealth>,
}

pub struct HealthReporter;

impl HealthReporter {
    /// Build a full health report from a snapshot.
    pub fn build(snapshot: &HealthSnapshot) -> HealthReport {
        let subsystems = SubsystemChecker::check_all(snapshot);
        let overall_status = Self::derive_overall(&subsystems);
        HealthReport { overall_status, subsystems }
    }

    /// Recommendations alongside the report, separated so a caller can show
    /// the report without necessarily showing remediation advice.
    pub fn recommendations(snapshot: &HealthSnapshot) -> Vec<Recommendation> {
        super::recommendations::generate(snapshot)
    }

    fn derive_overall(subsystems: &[SubsystemHealth]) -> HealthStatus {
        let mut worst = HealthStatus::Healthy;
        for s in subsystems {
            match s.status {
                HealthStatus::Unhealthy => return HealthStatus::Unhealthy,
                HealthStatus::Degraded => worst = HealthStatus::Degraded,
                HealthStatus::Healthy => {}
            }
        }
        worst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_healthy_inputs_produce_an_overall_healthy_report() {
        let snapshot = HealthSnapshot { embedding_healthy: true, vector_healthy: true, ..Default::default() };
        let report = HealthReporter::build(&snapshot);
        assert_eq!(report.overall_status, HealthStatus::Healthy);
    }

    #[test]
    fn a_down_embedding_service_degrades_the_overall_report() {
        let snapshot = HealthSnapshot { embedding_healthy: false, vector_healthy: true, ..Default::default() };
        let report = HealthReporter::build(&snapshot);
        assert_ne!(report.overall_status, HealthStatus::Healthy);
    }

    #[test]
    fn a_down_vector_index_is_unhealthy_not_merely_degraded() {
        let snapshot = HealthSnapshot { embedding_healthy: true, vector_healthy: false, ..Default::default() };
        let report = HealthReporter::build(&snapshot);
        assert_eq!(report.overall_status, HealthStatus::Unhealthy);
    }
}
