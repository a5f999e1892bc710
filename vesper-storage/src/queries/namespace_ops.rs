//! Namespace registry, handoffs, backup metadata.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use vesper_core::models::{BackupMetadata, BackupType, Handoff, NamespaceRecord};
use vesper_core::VesperResult;

use crate::to_storage_err;

pub fn touch_namespace(conn: &Connection, namespace: &str) -> VesperResult<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO namespaces (name, created_at, last_active) VALUES (?1, ?2, ?2)
         ON CONFLICT(name) DO UPDATE SET last_active = excluded.last_active",
        params![namespace, now],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn list_namespaces(conn: &Connection) -> VesperResult<Vec<NamespaceRecord>> {
    let mut stmt = conn
        .prepare("SELECT name, created_at, last_active FROM namespaces ORDER BY last_active DESC")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            let created_at: String = row.get(1)?;
            let last_active: String = row.get(2)?;
            Ok((row.get::<_, String>(0)?, created_at, last_active))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    let raw: Vec<(String, String, String)> =
        rows.collect::<Result<Vec<_>, _>>().map_err(|e| to_storage_err(e.to_string()))?;
    raw.into_iter()
        .map(|(name, created_at, last_active)| {
            Ok(NamespaceRecord { name, created_at: parse_dt(&created_at)?, last_active: parse_dt(&last_active)? })
        })
        .collect()
}

pub fn insert_handoff(conn: &Connection, handoff: &Handoff) -> VesperResult<()> {
    conn.execute(
        "INSERT INTO handoffs (id, from_namespace, to_namespace, filter, copied_count, created_at)
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            handoff.id.to_string(),
            handoff.from_namespace,
            handoff.to_namespace,
            handoff.filter,
            handoff.copied_count as i64,
            handoff.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn insert_backup_metadata(conn: &Connection, backup: &BackupMetadata) -> VesperResult<()> {
    conn.execute(
        "INSERT INTO backup_metadata
            (id, namespace, backup_timestamp, backup_type, status, memory_count,
             entity_count, relationship_count, expires_at, notes)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
        params![
            backup.id.to_string(),
            backup.namespace,
            backup.backup_timestamp.to_rfc3339(),
            backup_type_str(backup.backup_type),
            backup.status,
            backup.memory_count as i64,
            backup.entity_count as i64,
            backup.relationship_count as i64,
            backup.expires_at.to_rfc3339(),
            backup.notes,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

fn backup_type_str(t: BackupType) -> &'static str {
    match t {
        BackupType::Consolidation => "consolidation",
        BackupType::Manual => "manual",
    }
}

fn parse_dt(s: &str) -> VesperResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
