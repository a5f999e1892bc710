//! Phase 4: run the Conflict Detector over newly-touched entities.

use vesper_conflict::ConflictDetector;
use vesper_core::models::Conflict;
use vesper_core::{GraphStore, VesperResult};

pub fn run(detector: &ConflictDetector, store: &dyn GraphStore, namespace: &str, touched: &[uuid::Uuid]) -> VesperResult<Vec<Conflict>> {
    detector.detect_for_touched_entities(store, namespace, touched)
}
