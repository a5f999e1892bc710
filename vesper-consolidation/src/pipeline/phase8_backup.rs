//! Phase 8: emit a `backup_metadata` record with this run's counts and a
//! 7-day expiry.

use chrono::{Duration, Utc};
use vesper_core::constants::BACKUP_EXPIRY_DAYS;
use vesper_core::models::{BackupMetadata, BackupType};
use vesper_core::{GraphStore, VesperResult};

use crate::stats::ConsolidationStats;

pub fn run(store: &dyn GraphStore, namespace: &str, stats: &ConsolidationStats) -> VesperResult<BackupMetadata> {
    let now = Utc::now();
    let backup = BackupMetadata {
        id: uuid::Uuid::new_v4(),
        namespace: namespace.to_string(),
        backup_timestamp: now,
        backup_type: BackupType::Consolidation,
        status: "complete".to_string(),
        memory_count: stats.memories_processed,
        entity_count: stats.entities_extracted,
        relationship_count: stats.relationships_created,
        expires_at: now + Duration::days(BACKUP_EXPIRY_DAYS),
        notes: Some(format!(
            "consolidation pass: {} conflicts detected, {} relationships pruned, {} skills extracted",
            stats.conflicts_detected, stats.memories_pruned, stats.skills_extracted
        )),
    };
    store.insert_backup_metadata(&backup)?;
    Ok(backup)
}
