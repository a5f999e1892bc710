use serde_json::Value;

use crate::errors::VesperResult;

/// A single hit returned by `VectorIndex::search`.
#[derive(Debug, Clone)]
pub struct VectorHit {
    pub id: uuid::Uuid,
    pub score: f64,
    pub payload: Value,
}

/// Collection statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorStats {
    pub points: u64,
    pub indexed: u64,
}

/// Dense cosine search/upsert over a named collection keyed by UUID with
/// opaque JSON payloads.
///
/// `upsert` is synchronous with indexing: it must not return until the
/// point is queryable by `search`.
pub trait VectorIndex: Send + Sync {
    fn init_collection(&self, name: &str, dim: usize) -> VesperResult<()>;
    fn upsert(&self, collection: &str, id: uuid::Uuid, vector: &[f32], payload: Value) -> VesperResult<()>;
    fn search(&self, collection: &str, vector: &[f32], top_k: usize) -> VesperResult<Vec<VectorHit>>;
    fn delete(&self, collection: &str, id: uuid::Uuid) -> VesperResult<()>;
    fn stats(&self, collection: &str) -> VesperResult<VectorStats>;
}

/// Validate a collection name against the required pattern
/// `[A-Za-z0-9_-]{1,64}` without pulling `regex` into every caller.
pub fn is_valid_collection_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= crate::constants::COLLECTION_NAME_MAX_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
