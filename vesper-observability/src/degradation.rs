//! Degradation tracking: every time a downstream dependency (Embedding
//! Client, Vector Index, Working Tier remote backend) falls back to a
//! degraded path, it's recorded here for later inspection — distinct from
//! `HealthSnapshot`, which is a point-in-time probe, this is a log of
//! transitions over time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded degradation: which component, what failed, what fallback was used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub at: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn new(component: impl Into<String>, failure: impl Into<String>, fallback_used: impl Into<String>) -> Self {
        Self { component: component.into(), failure: failure.into(), fallback_used: fallback_used.into(), at: Utc::now() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Active,
    Recovered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: DegradationEvent) {
        tracing::warn!(
            event = "degradation_triggered",
            component = %event.component,
            failure = %event.failure,
            fallback = %event.fallback_used,
            "degradation triggered"
        );
        self.events.push(TrackedDegradation { event, recovery_status: RecoveryStatus::Active, recovered_at: None });
    }

    /// Mark the most recent active degradation for `component` as recovered.
    pub fn mark_recovered(&mut self, component: &str) {
        let now = Utc::now();
        for tracked in self.events.iter_mut().rev() {
            if tracked.event.component == component && tracked.recovery_status == RecoveryStatus::Active {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
                break;
            }
        }
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events.iter().filter(|t| t.recovery_status == RecoveryStatus::Active).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_marks_the_event_active() {
        let mut tracker = DegradationTracker::new();
        tracker.record(DegradationEvent::new("embedding", "connection refused", "stored without embedding"));
        assert_eq!(tracker.active_degradations().len(), 1);
    }

    #[test]
    fn recovery_clears_the_active_count_for_that_component_only() {
        let mut tracker = DegradationTracker::new();
        tracker.record(DegradationEvent::new("embedding", "timeout", "stored without embedding"));
        tracker.record(DegradationEvent::new("vector", "connection refused", "rolled back write"));

        tracker.mark_recovered("embedding");

        let active = tracker.active_degradations();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].event.component, "vector");
    }
}
