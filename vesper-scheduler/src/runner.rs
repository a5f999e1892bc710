use vesper_consolidation::ConsolidationStats;
use vesper_core::VesperResult;

/// The seam between the scheduler and whatever owns the engines — an
/// injected handle rather than a process-wide global. `vesper-service::MemoryService`
/// implements this directly; tests use a stub.
#[async_trait::async_trait]
pub trait ConsolidationRunner: Send + Sync {
    /// Namespaces that currently have a registry entry (same set
    /// `list_namespaces` returns). The scheduler consolidates every one of
    /// them on each trigger — the consolidation trigger is process-wide,
    /// not per-namespace-on-demand.
    async fn namespaces(&self) -> VesperResult<Vec<String>>;

    /// Run one consolidation pass for `namespace` under its write lock.
    async fn run_consolidation(&self, namespace: &str) -> VesperResult<ConsolidationStats>;
}
