//! Phase 5: prune weak relationships.

use vesper_core::VesperResult;
use vesper_semantic::{PruneReport, SemanticTier};

pub fn run(semantic: &SemanticTier, namespace: &str) -> VesperResult<PruneReport> {
    semantic.prune(namespace)
}
