//! Fact CRUD.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use vesper_core::models::Fact;
use vesper_core::VesperResult;

use crate::to_storage_err;

const COLUMNS: &str =
    "id, namespace, entity_id, property, value, confidence, valid_from, valid_until, source_conversation";

pub fn upsert(conn: &Connection, fact: &Fact) -> VesperResult<Fact> {
    conn.execute(
        &format!(
            "INSERT INTO facts ({COLUMNS}) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)
             ON CONFLICT(id) DO UPDATE SET
                value = excluded.value,
                confidence = excluded.confidence,
                valid_until = excluded.valid_until"
        ),
        params![
            fact.id.to_string(),
            fact.namespace,
            fact.entity_id.to_string(),
            fact.property,
            fact.value,
            fact.confidence,
            fact.valid_from.map(|t| t.to_rfc3339()),
            fact.valid_until.map(|t| t.to_rfc3339()),
            fact.source_conversation,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(fact.clone())
}

pub fn list_for_entity(conn: &Connection, namespace: &str, entity_id: Uuid) -> VesperResult<Vec<Fact>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM facts WHERE namespace = ?1 AND entity_id = ?2"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![namespace, entity_id.to_string()], row_to_fact)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?
        .into_iter()
        .collect()
}

pub fn list_for_property(
    conn: &Connection,
    namespace: &str,
    entity_id: Uuid,
    property: &str,
) -> VesperResult<Vec<Fact>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM facts WHERE namespace = ?1 AND entity_id = ?2 AND property = ?3"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![namespace, entity_id.to_string(), property], row_to_fact)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?
        .into_iter()
        .collect()
}

pub fn set_confidence(conn: &Connection, namespace: &str, id: Uuid, confidence: f64) -> VesperResult<()> {
    conn.execute(
        "UPDATE facts SET confidence = ?3 WHERE namespace = ?1 AND id = ?2",
        params![namespace, id.to_string(), confidence],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get(conn: &Connection, namespace: &str, id: Uuid) -> VesperResult<Option<Fact>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM facts WHERE namespace = ?1 AND id = ?2"),
        params![namespace, id.to_string()],
        row_to_fact,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .transpose()
}

/// Entities touched by a fact written or updated since `since` — feeds the
/// consolidation pipeline's "what needs decay re-evaluation" step.
pub fn entities_touched_since(conn: &Connection, namespace: &str, since: DateTime<Utc>) -> VesperResult<Vec<Uuid>> {
    let mut stmt = conn
        .prepare(
            "SELECT DISTINCT entity_id FROM facts WHERE namespace = ?1 AND valid_from >= ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![namespace, since.to_rfc3339()], |row| {
            let s: String = row.get(0)?;
            Ok(s)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    let ids: Vec<String> = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    ids.into_iter()
        .map(|s| Uuid::parse_str(&s).map_err(|e| to_storage_err(e.to_string())))
        .collect()
}

fn row_to_fact(row: &rusqlite::Row<'_>) -> rusqlite::Result<VesperResult<Fact>> {
    Ok((|| -> VesperResult<Fact> {
        let id: String = row.get(0)?;
        let entity_id: String = row.get(2)?;
        let valid_from: Option<String> = row.get(6)?;
        let valid_until: Option<String> = row.get(7)?;
        Ok(Fact {
            id: Uuid::parse_str(&id).map_err(|e| to_storage_err(e.to_string()))?,
            namespace: row.get(1)?,
            entity_id: Uuid::parse_str(&entity_id).map_err(|e| to_storage_err(e.to_string()))?,
            property: row.get(3)?,
            value: row.get(4)?,
            confidence: row.get(5)?,
            valid_from: valid_from.as_deref().map(parse_dt).transpose()?,
            valid_until: valid_until.as_deref().map(parse_dt).transpose()?,
            source_conversation: row.get(8)?,
        })
    })())
}

fn parse_dt(s: &str) -> VesperResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
