//! `MemoryService`: the stable operation surface the transport layer
//! (`vesper-mcp`) consumes. A plain struct holding every engine handle
//! explicitly — no process-wide singleton. Construct once in `main` and
//! share via `Arc`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use vesper_conflict::ConflictDetector;
use vesper_consolidation::{ConsolidationPipeline, ConsolidationStats};
use vesper_core::models::{NamespaceRecord, Skill};
use vesper_core::{EmbeddingClient, GraphStore, VectorIndex, VesperError, VesperResult};
use vesper_router::SmartRouter;
use vesper_semantic::SemanticTier;
use vesper_skills::SkillLibrary;
use vesper_working::WorkingTier;

use crate::ops;
use crate::types::{
    DeleteResult, EnableResult, RetrieveResult, ShareContextResult, SkillOutcomeResult, StatsResult, StoreResult,
};

pub struct MemoryService {
    store: Arc<dyn GraphStore>,
    embedder: Arc<dyn EmbeddingClient>,
    vector: Arc<dyn VectorIndex>,
    working: Arc<WorkingTier>,
    semantic: Arc<SemanticTier>,
    skills: Arc<SkillLibrary>,
    #[allow(dead_code)]
    conflicts: Arc<ConflictDetector>,
    consolidation: Arc<ConsolidationPipeline>,
    router: Arc<SmartRouter>,
    collection: String,
    namespace_locks: DashMap<String, Arc<AsyncMutex<()>>>,
    enabled: AtomicBool,
}

impl MemoryService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn GraphStore>,
        embedder: Arc<dyn EmbeddingClient>,
        vector: Arc<dyn VectorIndex>,
        working: Arc<WorkingTier>,
        semantic: Arc<SemanticTier>,
        skills: Arc<SkillLibrary>,
        conflicts: Arc<ConflictDetector>,
        consolidation: Arc<ConsolidationPipeline>,
        router: Arc<SmartRouter>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            store,
            embedder,
            vector,
            working,
            semantic,
            skills,
            conflicts,
            consolidation,
            router,
            collection: collection.into(),
            namespace_locks: DashMap::new(),
            enabled: AtomicBool::new(true),
        }
    }

    fn lock_for(&self, namespace: &str) -> Arc<AsyncMutex<()>> {
        self.namespace_locks.entry(namespace.to_string()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
    }

    /// Run a blocking closure on the blocking thread pool, mapping a panic
    /// to an `Internal` error instead of poisoning the caller's task: the
    /// engine layer is synchronous, the façade is where `tokio` enters the
    /// picture.
    async fn run_blocking<F, T>(f: F) -> VesperResult<T>
    where
        F: FnOnce() -> VesperResult<T> + Send + 'static,
        T: Send + 'static,
    {
        match tokio::task::spawn_blocking(f).await {
            Ok(result) => result,
            Err(join_err) => Err(VesperError::Internal(format!("engine task panicked: {join_err}"))),
        }
    }

    fn ensure_enabled(&self) -> VesperResult<()> {
        if self.enabled.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(VesperError::Internal("vesper is disabled for this process (vesper_enable to resume)".to_string()))
        }
    }

    /// `store_memory`. Writes to `namespace` are
    /// serialized against any other write to the same namespace;
    /// reads and writes to other namespaces proceed independently.
    pub async fn store(
        &self,
        namespace: &str,
        content: &str,
        memory_type: &str,
        metadata: Option<Value>,
        agent_id: Option<String>,
        task_id: Option<String>,
    ) -> VesperResult<StoreResult> {
        self.store_impl(namespace, content, memory_type, metadata, agent_id, task_id, false).await
    }

    /// `store_decision` : identical ordering to
    /// `store`, but flags the record so consolidation reinforces its
    /// relationships with `decision_reinforcement_strength`.
    pub async fn store_decision(
        &self,
        namespace: &str,
        content: &str,
        memory_type: &str,
        metadata: Option<Value>,
        agent_id: Option<String>,
        task_id: Option<String>,
    ) -> VesperResult<StoreResult> {
        self.store_impl(namespace, content, memory_type, metadata, agent_id, task_id, true).await
    }

    #[allow(clippy::too_many_arguments)]
    async fn store_impl(
        &self,
        namespace: &str,
        content: &str,
        memory_type: &str,
        metadata: Option<Value>,
        agent_id: Option<String>,
        task_id: Option<String>,
        is_decision: bool,
    ) -> VesperResult<StoreResult> {
        self.ensure_enabled()?;
        let lock = self.lock_for(namespace);
        let _guard = lock.lock().await;

        let store = self.store.clone();
        let embedder = self.embedder.clone();
        let vector = self.vector.clone();
        let working = self.working.clone();
        let collection = self.collection.clone();
        let namespace = namespace.to_string();
        let content = content.to_string();
        let memory_type = memory_type.to_string();

        Self::run_blocking(move || {
            ops::store::store_sync(
                store.as_ref(),
                embedder.as_ref(),
                vector.as_ref(),
                &working,
                &collection,
                &namespace,
                &content,
                &memory_type,
                metadata,
                agent_id,
                task_id,
                is_decision,
            )
        })
        .await
    }

    /// `retrieve_memory`. Reads never take the namespace
    /// lock — concurrent with writes to the same namespace by design.
    pub async fn retrieve(&self, namespace: &str, query: &str, max_results: usize) -> VesperResult<RetrieveResult> {
        self.ensure_enabled()?;
        let router = self.router.clone();
        let namespace = namespace.to_string();
        let query = query.to_string();
        let started = std::time::Instant::now();

        let (route, results) = Self::run_blocking(move || router.route(&namespace, &query, max_results)).await?;
        Ok(RetrieveResult { results, route, latency_ms: started.elapsed().as_millis() as u64 })
    }

    /// `list_recent`: a direct Working Tier read, no engine
    /// dispatch needed.
    pub fn list_recent(&self, namespace: &str, k: usize) -> Vec<vesper_core::models::ConversationRecord> {
        self.working.recent(namespace, k)
    }

    /// `delete_memory` (round-trip law).
    pub async fn delete(&self, namespace: &str, conversation_id: &str) -> VesperResult<DeleteResult> {
        self.ensure_enabled()?;
        let lock = self.lock_for(namespace);
        let _guard = lock.lock().await;

        let store = self.store.clone();
        let vector = self.vector.clone();
        let working = self.working.clone();
        let collection = self.collection.clone();
        let namespace = namespace.to_string();
        let conversation_id = conversation_id.to_string();

        let deleted = Self::run_blocking(move || ops::delete::delete_sync(store.as_ref(), vector.as_ref(), &working, &collection, &namespace, &conversation_id))
            .await?;
        Ok(DeleteResult { deleted })
    }

    /// `get_stats` / `namespace_stats`.
    pub async fn stats(&self, namespace: &str) -> VesperResult<StatsResult> {
        let store = self.store.clone();
        let vector = self.vector.clone();
        let collection = self.collection.clone();
        let namespace = namespace.to_string();
        Self::run_blocking(move || ops::stats::compute(store.as_ref(), vector.as_ref(), &collection, &namespace)).await
    }

    /// `share_context`. Serializes on `to_namespace`'s
    /// write lock only — `from_namespace` is read-only for this operation.
    pub async fn share_context(
        &self,
        from_namespace: &str,
        to_namespace: &str,
        filter: Option<String>,
    ) -> VesperResult<ShareContextResult> {
        self.ensure_enabled()?;
        let lock = self.lock_for(to_namespace);
        let _guard = lock.lock().await;

        let store = self.store.clone();
        let vector = self.vector.clone();
        let working = self.working.clone();
        let collection = self.collection.clone();
        let from_namespace = from_namespace.to_string();
        let to_namespace = to_namespace.to_string();

        Self::run_blocking(move || {
            ops::share_context::share_sync(store.as_ref(), vector.as_ref(), &working, &collection, &from_namespace, &to_namespace, filter.as_deref())
        })
        .await
    }

    /// `list_namespaces`.
    pub async fn list_namespaces(&self) -> VesperResult<Vec<NamespaceRecord>> {
        let store = self.store.clone();
        Self::run_blocking(move || store.list_namespaces()).await
    }

    /// `load_skill`.
    pub async fn load_skill(&self, namespace: &str, skill_id: Uuid) -> VesperResult<Skill> {
        let skills = self.skills.clone();
        let namespace = namespace.to_string();
        Self::run_blocking(move || ops::skills::load(&skills, &namespace, skill_id)).await
    }

    /// `record_skill_outcome`.
    pub async fn record_skill_outcome(
        &self,
        namespace: &str,
        skill_id: Uuid,
        success: bool,
        satisfaction: Option<f64>,
    ) -> VesperResult<SkillOutcomeResult> {
        let skills = self.skills.clone();
        let namespace = namespace.to_string();
        Self::run_blocking(move || ops::skills::record_outcome(&skills, &namespace, skill_id, success, satisfaction)).await
    }

    /// `vesper_enable` / `vesper_disable` / `vesper_status`.
    /// A disabled service rejects `store`/`retrieve`/`delete`/`share_context`
    /// with an `Internal` error; read-only introspection (`stats`,
    /// `list_namespaces`, `list_recent`) still works.
    pub fn enable(&self) -> EnableResult {
        self.enabled.store(true, Ordering::Release);
        EnableResult { enabled: true }
    }

    pub fn disable(&self) -> EnableResult {
        self.enabled.store(false, Ordering::Release);
        EnableResult { enabled: false }
    }

    pub fn status(&self) -> EnableResult {
        EnableResult { enabled: self.enabled.load(Ordering::Acquire) }
    }

    /// Run one consolidation pass over `namespace`. The namespace write
    /// lock is acquired and released by the pipeline around each phase's
    /// own transaction, not held for the whole run — a slow phase never
    /// blocks `store`/`delete`/`share_context` on this namespace for longer
    /// than its own phase takes. Invoked by `vesper-scheduler`'s triggers,
    /// not part of the MCP tool surface.
    pub async fn run_consolidation(&self, namespace: &str) -> VesperResult<ConsolidationStats> {
        let lock = self.lock_for(namespace);
        let consolidation = self.consolidation.clone();
        let namespace = namespace.to_string();
        Self::run_blocking(move || consolidation.run(&namespace, &lock)).await
    }
}

/// Lets `vesper-scheduler::Scheduler` drive consolidation without depending
/// on the full `MemoryService` surface (inject a handle, not a
/// global).
#[async_trait::async_trait]
impl vesper_scheduler::ConsolidationRunner for MemoryService {
    async fn namespaces(&self) -> VesperResult<Vec<String>> {
        self.list_namespaces().await.map(|rows| rows.into_iter().map(|r| r.name).collect())
    }

    async fn run_consolidation(&self, namespace: &str) -> VesperResult<ConsolidationStats> {
        MemoryService::run_consolidation(self, namespace).await
    }
}
