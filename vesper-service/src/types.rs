//! Response types returned by `MemoryService` operations.

use serde::Serialize;

use vesper_core::models::{RetrievedResult, RouteDecision};

#[derive(Debug, Clone, Serialize)]
pub struct StoreResult {
    pub id: String,
    pub has_embedding: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetrieveResult {
    pub results: Vec<RetrievedResult>,
    pub route: RouteDecision,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub deleted: bool,
}

/// `get_stats` / `namespace_stats`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatsResult {
    pub points: u64,
    pub entities: u64,
    pub relationships: u64,
    pub facts: u64,
    pub conflicts: u64,
    pub skills: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareContextResult {
    pub copied: u64,
    pub handoff_id: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SkillOutcomeResult {
    pub quality_score: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnableResult {
    pub enabled: bool,
}
