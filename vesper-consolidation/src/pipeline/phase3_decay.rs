//! Phase 3: apply temporal decay to every relationship.

use vesper_core::VesperResult;
use vesper_semantic::SemanticTier;

pub fn run(semantic: &SemanticTier, namespace: &str) -> VesperResult<usize> {
    semantic.apply_decay(namespace)
}
