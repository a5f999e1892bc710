//! The nine-phase consolidation pipeline: snapshot → extract →
//! decay → detect conflicts → prune → extract skills → recompute relational
//! vectors → emit backup metadata → clear. Each phase is its own module,
//! composed here by a single orchestrator that owns every engine handle
//! and aggregates statistics.

mod phase1_snapshot;
mod phase2_extract;
mod phase3_decay;
mod phase4_conflicts;
mod phase5_prune;
mod phase6_skills;
mod phase7_relational;
mod phase8_backup;
mod phase9_clear;

use std::sync::Arc;
use std::time::Instant;

use regex::Regex;
use vesper_conflict::ConflictDetector;
use vesper_core::config::ConsolidationConfig;
use vesper_core::models::ConversationRecord;
use vesper_core::{EmbeddingClient, GraphStore, VesperResult};
use vesper_semantic::SemanticTier;
use vesper_skills::SkillLibrary;
use vesper_working::WorkingTier;

use crate::stats::ConsolidationStats;

pub struct ConsolidationPipeline {
    store: Arc<dyn GraphStore>,
    embedder: Arc<dyn EmbeddingClient>,
    working: Arc<WorkingTier>,
    semantic: Arc<SemanticTier>,
    skills: Arc<SkillLibrary>,
    conflicts: Arc<ConflictDetector>,
    preference_pattern: Regex,
}

impl ConsolidationPipeline {
    pub fn new(
        store: Arc<dyn GraphStore>,
        embedder: Arc<dyn EmbeddingClient>,
        working: Arc<WorkingTier>,
        semantic: Arc<SemanticTier>,
        skills: Arc<SkillLibrary>,
        conflicts: Arc<ConflictDetector>,
        config: &ConsolidationConfig,
    ) -> VesperResult<Self> {
        let preference_pattern = Regex::new(&config.preference_pattern)
            .map_err(|e| vesper_core::VesperError::InvalidInput(format!("invalid preference_pattern: {e}")))?;
        Ok(Self { store, embedder, working, semantic, skills, conflicts, preference_pattern })
    }

    /// Run one full consolidation pass over `namespace`. `namespace_lock` is
    /// the same per-namespace write lock `store`/`delete`/`share_context`
    /// serialize on — acquired and released around each phase's own
    /// transaction rather than held for the whole pass, so a slow phase
    /// (skill extraction, relational recompute) doesn't block concurrent
    /// writers to the namespace for the duration of the entire run.
    pub fn run(&self, namespace: &str, namespace_lock: &tokio::sync::Mutex<()>) -> VesperResult<ConsolidationStats> {
        let started = Instant::now();
        let since = chrono::Utc::now();
        let mut stats = ConsolidationStats::default();

        // Phases 3-8 are isolated like phase 2: a failure is logged and
        // counted, and the next phase still runs. Only a store-open failure
        // (construction, above) is fatal to the whole pass. Each phase takes
        // the namespace lock for just its own body.
        macro_rules! isolate {
            ($phase:literal, $body:expr) => {{
                let _guard = namespace_lock.blocking_lock();
                if let Err(err) = $body {
                    stats.phase_errors += 1;
                    tracing::warn!(namespace, phase = $phase, error = %err, "vesper-consolidation: phase failed, continuing");
                }
            }};
        }

        // Phase 1: snapshot + drain the Working Tier.
        let records = {
            let _guard = namespace_lock.blocking_lock();
            phase1_snapshot::snapshot(&self.working, namespace)
        };
        stats.memories_processed = records.len() as u64;

        // Phase 2: per-record extraction, with embedding back-fill and
        // per-record error isolation so one bad record doesn't abort the
        // run. Each record is its own transaction under the namespace lock.
        for record in &records {
            let record = self.backfill_embedding(record);
            let _guard = namespace_lock.blocking_lock();
            match phase2_extract::process_record(&self.semantic, namespace, &record, &self.preference_pattern) {
                Ok(outcome) => {
                    stats.entities_extracted += outcome.entities_extracted;
                    stats.relationships_created += outcome.relationships_created;
                    if let Err(err) = self.store.mark_conversation_consolidated(&record.conversation_id) {
                        tracing::warn!(namespace, conversation_id = %record.conversation_id, error = %err, "vesper-consolidation: failed to mark conversation consolidated");
                    }
                }
                Err(err) => {
                    tracing::warn!(namespace, conversation_id = %record.conversation_id, error = %err, "vesper-consolidation: phase 2 skipped a record");
                }
            }
        }

        // Phase 3: temporal decay over every relationship in the namespace.
        isolate!("decay", phase3_decay::run(&self.semantic, namespace));

        // Phase 4: conflict detection over entities touched since `since`.
        isolate!("conflicts", {
            self.store.touched_entities_since(namespace, since).and_then(|touched| {
                let conflicts = phase4_conflicts::run(&self.conflicts, self.store.as_ref(), namespace, &touched)?;
                stats.conflicts_detected = conflicts.len() as u64;
                Ok(())
            })
        });

        // Phase 5: prune weak relationships.
        isolate!("prune", {
            phase5_prune::run(&self.semantic, namespace).map(|report| {
                stats.memories_pruned = report.relationships_pruned as u64;
            })
        });

        // Phase 6: extract candidate skills from feedback-bearing records.
        isolate!("skills", {
            phase6_skills::run(&self.skills, namespace, &records).map(|outcome| {
                stats.skills_extracted = outcome.skills_extracted;
            })
        });

        // Phase 7: recompute relational vectors gone stale.
        isolate!("relational", phase7_relational::run(&self.skills, namespace));

        // Phase 8: emit backup metadata for this run.
        isolate!("backup", phase8_backup::run(self.store.as_ref(), namespace, &stats));

        stats.duration_ms = started.elapsed().as_millis() as u64;

        // Phase 9: checkpoint. No store/working-tier access, no lock needed.
        phase9_clear::run(namespace, stats.memories_processed);

        Ok(stats)
    }

    /// Records whose embedding degraded at store time get one
    /// retry here before entity extraction, so degraded writes self-heal on
    /// the next consolidation pass. A successful retry is persisted back
    /// onto the graph's conversation row too, not just the in-memory copy
    /// used for this pass's extraction.
    fn backfill_embedding(&self, record: &ConversationRecord) -> ConversationRecord {
        if record.embedding.is_some() {
            return record.clone();
        }
        match self.embedder.embed(&record.full_text) {
            Ok(embedding) => {
                if let Err(err) = self.store.set_conversation_embedding(&record.conversation_id, &embedding) {
                    tracing::warn!(conversation_id = %record.conversation_id, error = %err, "vesper-consolidation: embedding back-fill persist failed");
                }
                let mut filled = record.clone();
                filled.embedding = Some(embedding);
                filled
            }
            Err(_) => record.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::config::{DecayConfig, SkillConfig};
    use vesper_core::errors::EmbeddingError;
    use vesper_core::VesperResult as Result;
    use vesper_storage::StorageEngine;

    struct StubEmbedder;
    impl EmbeddingClient for StubEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            if text.trim().is_empty() {
                return Err(EmbeddingError::EmptyInput.into());
            }
            Ok(vec![1.0, 0.0])
        }
        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            texts.iter().map(|t| self.embed(t)).collect()
        }
        fn dimensions(&self) -> usize {
            2
        }
        fn health(&self) -> bool {
            true
        }
    }

    fn build_pipeline() -> ConsolidationPipeline {
        let store: Arc<dyn GraphStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
        let embedder: Arc<dyn EmbeddingClient> = Arc::new(StubEmbedder);
        let working = Arc::new(WorkingTier::new(embedder.clone(), Default::default()));
        let semantic = Arc::new(SemanticTier::new(store.clone(), DecayConfig::default()));
        let skills = Arc::new(SkillLibrary::new(store.clone(), SkillConfig::default()));
        let conflicts = Arc::new(ConflictDetector::new(&DecayConfig::default()));
        ConsolidationPipeline::new(store, embedder, working, semantic, skills, conflicts, &ConsolidationConfig::default()).unwrap()
    }

    #[test]
    fn empty_namespace_produces_zeroed_stats() {
        let pipeline = build_pipeline();
        let lock = tokio::sync::Mutex::new(());
        let stats = pipeline.run("default", &lock).unwrap();
        assert_eq!(stats.memories_processed, 0);
        assert_eq!(stats.entities_extracted, 0);
    }

    #[test]
    fn processes_stored_record_and_extracts_entities() {
        let pipeline = build_pipeline();
        pipeline.working.store(ConversationRecord::new("default", "Alice met Bob to discuss the Drift Project.")).unwrap();

        let lock = tokio::sync::Mutex::new(());
        let stats = pipeline.run("default", &lock).unwrap();
        assert_eq!(stats.memories_processed, 1);
        assert!(stats.entities_extracted > 0);
        assert_eq!(pipeline.working.recent("default", 10).len(), 0);
    }

    #[test]
    fn consolidation_is_idempotent_on_an_already_drained_namespace() {
        let pipeline = build_pipeline();
        pipeline.working.store(ConversationRecord::new("default", "Alice met Bob.")).unwrap();
        let lock = tokio::sync::Mutex::new(());
        pipeline.run("default", &lock).unwrap();

        let second = pipeline.run("default", &lock).unwrap();
        assert_eq!(second.memories_processed, 0);
        assert_eq!(second.conflicts_detected, 0);
    }
}
