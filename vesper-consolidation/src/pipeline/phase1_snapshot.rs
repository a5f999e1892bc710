//! Phase 1: snapshot all Working Tier records for a namespace.

use vesper_core::models::ConversationRecord;
use vesper_working::WorkingTier;

pub fn snapshot(working: &WorkingTier, namespace: &str) -> Vec<ConversationRecord> {
    working.drain_for_consolidation(namespace)
}
