//! Phase 9: checkpoint the run.
//!
//! Phase 1's `WorkingTier::drain_for_consolidation` already removed every
//! record this run processed, atomically under the namespace's ring lock.
//! Re-clearing here would also drop anything stored concurrently while the
//! pipeline ran, so this phase only logs the checkpoint.

pub fn run(namespace: &str, memories_processed: u64) {
    tracing::info!(namespace, memories_processed, "vesper-consolidation: run complete");
}
