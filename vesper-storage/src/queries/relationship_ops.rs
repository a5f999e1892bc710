//! Relationship CRUD.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use vesper_core::models::Relationship;
use vesper_core::VesperResult;

use crate::to_storage_err;

const COLUMNS: &str = "id, namespace, source_id, target_id, relation_type, strength, \
     evidence, access_count, created_at, last_reinforced";

pub fn upsert(conn: &Connection, rel: &Relationship) -> VesperResult<Relationship> {
    let evidence_json = serde_json::to_string(&rel.evidence).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        &format!(
            "INSERT INTO relationships ({COLUMNS}) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)
             ON CONFLICT(namespace, source_id, target_id, relation_type) DO UPDATE SET
                strength = excluded.strength,
                evidence = excluded.evidence,
                access_count = excluded.access_count,
                last_reinforced = excluded.last_reinforced"
        ),
        params![
            rel.id.to_string(),
            rel.namespace,
            rel.source_id.to_string(),
            rel.target_id.to_string(),
            rel.relation_type,
            rel.strength,
            evidence_json,
            rel.access_count as i64,
            rel.created_at.to_rfc3339(),
            rel.last_reinforced.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    get(conn, &rel.namespace, rel.source_id, rel.target_id, &rel.relation_type)?
        .ok_or_else(|| to_storage_err("relationship vanished immediately after upsert"))
}

pub fn get(
    conn: &Connection,
    namespace: &str,
    source_id: Uuid,
    target_id: Uuid,
    relation_type: &str,
) -> VesperResult<Option<Relationship>> {
    conn.query_row(
        &format!(
            "SELECT {COLUMNS} FROM relationships
             WHERE namespace = ?1 AND source_id = ?2 AND target_id = ?3 AND relation_type = ?4"
        ),
        params![namespace, source_id.to_string(), target_id.to_string(), relation_type],
        row_to_relationship,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .transpose()
}

pub fn list(conn: &Connection, namespace: &str) -> VesperResult<Vec<Relationship>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM relationships WHERE namespace = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![namespace], row_to_relationship)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?
        .into_iter()
        .collect()
}

pub fn list_outgoing(conn: &Connection, namespace: &str, source_id: Uuid) -> VesperResult<Vec<Relationship>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM relationships WHERE namespace = ?1 AND source_id = ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![namespace, source_id.to_string()], row_to_relationship)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?
        .into_iter()
        .collect()
}

pub fn delete(conn: &Connection, namespace: &str, id: Uuid) -> VesperResult<()> {
    conn.execute(
        "DELETE FROM relationships WHERE namespace = ?1 AND id = ?2",
        params![namespace, id.to_string()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

fn row_to_relationship(row: &rusqlite::Row<'_>) -> rusqlite::Result<VesperResult<Relationship>> {
    Ok((|| -> VesperResult<Relationship> {
        let id: String = row.get(0)?;
        let source_id: String = row.get(2)?;
        let target_id: String = row.get(3)?;
        let evidence_json: String = row.get(6)?;
        let created_at: String = row.get(8)?;
        let last_reinforced: String = row.get(9)?;
        Ok(Relationship {
            id: Uuid::parse_str(&id).map_err(|e| to_storage_err(e.to_string()))?,
            namespace: row.get(1)?,
            source_id: Uuid::parse_str(&source_id).map_err(|e| to_storage_err(e.to_string()))?,
            target_id: Uuid::parse_str(&target_id).map_err(|e| to_storage_err(e.to_string()))?,
            relation_type: row.get(4)?,
            strength: row.get(5)?,
            evidence: serde_json::from_str(&evidence_json).map_err(|e| to_storage_err(e.to_string()))?,
            access_count: row.get::<_, i64>(7)? as u64,
            created_at: parse_dt(&created_at)?,
            last_reinforced: parse_dt(&last_reinforced)?,
        })
    })())
}

fn parse_dt(s: &str) -> VesperResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
