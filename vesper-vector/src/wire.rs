//! Wire shapes for the Qdrant-shaped collection API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
pub struct CreateCollectionRequest {
    pub vectors: VectorParams,
}

#[derive(Serialize)]
pub struct VectorParams {
    pub size: usize,
    pub distance: &'static str,
}

#[derive(Serialize)]
pub struct Point {
    pub id: uuid::Uuid,
    pub vector: Vec<f32>,
    pub payload: Value,
}

#[derive(Serialize)]
pub struct UpsertRequest {
    pub points: Vec<Point>,
    /// Qdrant-style `wait=true` semantics: the call blocks until the point
    /// is indexed and queryable (synchronous-upsert invariant).
    pub wait: bool,
}

#[derive(Serialize)]
pub struct SearchRequest {
    pub vector: Vec<f32>,
    pub limit: usize,
    pub with_payload: bool,
}

#[derive(Deserialize)]
pub struct SearchResponseHit {
    pub id: uuid::Uuid,
    pub score: f64,
    pub payload: Option<Value>,
}

#[derive(Deserialize)]
pub struct SearchResponse {
    pub result: Vec<SearchResponseHit>,
}

#[derive(Serialize)]
pub struct DeletePointsRequest {
    pub points: Vec<uuid::Uuid>,
    pub wait: bool,
}

#[derive(Deserialize)]
pub struct CollectionInfoResponse {
    pub result: CollectionInfo,
}

#[derive(Deserialize)]
pub struct CollectionInfo {
    pub points_count: u64,
    pub indexed_vectors_count: u64,
}
