//! Per-run consolidation statistics.

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ConsolidationStats {
    pub memories_processed: u64,
    pub entities_extracted: u64,
    pub relationships_created: u64,
    pub conflicts_detected: u64,
    pub memories_pruned: u64,
    pub skills_extracted: u64,
    pub duration_ms: u64,
    /// Count of phases 3-8 that failed and were skipped this run. Each
    /// failure is logged; it never aborts the remaining phases.
    pub phase_errors: u64,
}
