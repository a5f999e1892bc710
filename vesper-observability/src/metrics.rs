//! Consolidation metrics aggregation: a rolling collector over
//! `vesper_consolidation::ConsolidationStats` samples, surfacing the
//! per-run counts a consolidation pass reports as aggregate statistics.

use serde::{Deserialize, Serialize};
use vesper_consolidation::ConsolidationStats;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsolidationMetricsCollector {
    samples: Vec<ConsolidationStats>,
}

impl ConsolidationMetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed consolidation run (phase 9).
    pub fn record(&mut self, stats: ConsolidationStats) {
        tracing::info!(
            event = "consolidation_completed",
            memories_processed = stats.memories_processed,
            entities_extracted = stats.entities_extracted,
            conflicts_detected = stats.conflicts_detected,
            memories_pruned = stats.memories_pruned,
            skills_extracted = stats.skills_extracted,
            duration_ms = stats.duration_ms,
            "consolidation completed"
        );
        self.samples.push(stats);
    }

    pub fn total_runs(&self) -> u64 {
        self.samples.len() as u64
    }

    pub fn avg_duration_ms(&self) -> f64 {
        Self::avg(&self.samples, |s| s.duration_ms as f64)
    }

    pub fn avg_entities_extracted(&self) -> f64 {
        Self::avg(&self.samples, |s| s.entities_extracted as f64)
    }

    /// Conflicts detected per run — a rising trend signals the conflict
    /// backlog is outpacing resolution (never auto-resolved).
    pub fn conflicts_per_run(&self) -> f64 {
        Self::avg(&self.samples, |s| s.conflicts_detected as f64)
    }

    pub fn last(&self) -> Option<&ConsolidationStats> {
        self.samples.last()
    }

    fn avg(samples: &[ConsolidationStats], f: fn(&ConsolidationStats) -> f64) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().map(f).sum::<f64>() / samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_are_zero_with_no_samples() {
        let collector = ConsolidationMetricsCollector::new();
        assert_eq!(collector.avg_duration_ms(), 0.0);
        assert_eq!(collector.total_runs(), 0);
    }

    #[test]
    fn records_accumulate_into_averages() {
        let mut collector = ConsolidationMetricsCollector::new();
        collector.record(ConsolidationStats { duration_ms: 10, entities_extracted: 2, ..Default::default() });
        collector.record(ConsolidationStats { duration_ms: 20, entities_extracted: 4, ..Default::default() });

        assert_eq!(collector.total_runs(), 2);
        assert_eq!(collector.avg_duration_ms(), 15.0);
        assert_eq!(collector.avg_entities_extracted(), 3.0);
    }
}
