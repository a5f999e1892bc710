//! Entity CRUD.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use vesper_core::models::{Entity, EntityType};
use vesper_core::VesperResult;

use crate::to_storage_err;

const SELECT_COLUMNS: &str = "id, namespace, entity_type, name, description, confidence, \
     created_at, last_accessed, access_count";

pub fn upsert(conn: &Connection, entity: &Entity) -> VesperResult<Entity> {
    conn.execute(
        &format!(
            "INSERT INTO entities ({SELECT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(namespace, entity_type, name) DO UPDATE SET
                description = excluded.description,
                confidence = excluded.confidence,
                last_accessed = excluded.last_accessed,
                access_count = excluded.access_count"
        ),
        params![
            entity.id.to_string(),
            entity.namespace,
            entity.entity_type.to_string(),
            entity.name,
            entity.description,
            entity.confidence,
            entity.created_at.to_rfc3339(),
            entity.last_accessed.to_rfc3339(),
            entity.access_count as i64,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    get_by_name(conn, &entity.namespace, &entity.name, entity.entity_type)?
        .ok_or_else(|| to_storage_err("entity vanished immediately after upsert"))
}

pub fn get(conn: &Connection, namespace: &str, id: Uuid) -> VesperResult<Option<Entity>> {
    conn.query_row(
        &format!("SELECT {SELECT_COLUMNS} FROM entities WHERE namespace = ?1 AND id = ?2"),
        params![namespace, id.to_string()],
        row_to_entity,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .transpose()
}

pub fn get_by_name(
    conn: &Connection,
    namespace: &str,
    name: &str,
    entity_type: EntityType,
) -> VesperResult<Option<Entity>> {
    conn.query_row(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM entities WHERE namespace = ?1 AND entity_type = ?2 AND name = ?3"
        ),
        params![namespace, entity_type.to_string(), name],
        row_to_entity,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .transpose()
}

pub fn touch(conn: &Connection, namespace: &str, id: Uuid) -> VesperResult<()> {
    conn.execute(
        "UPDATE entities SET access_count = access_count + 1, last_accessed = ?3
         WHERE namespace = ?1 AND id = ?2",
        params![namespace, id.to_string(), Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn list_by_type(
    conn: &Connection,
    namespace: &str,
    entity_type: EntityType,
) -> VesperResult<Vec<Entity>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM entities WHERE namespace = ?1 AND entity_type = ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![namespace, entity_type.to_string()], row_to_entity)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?
        .into_iter()
        .collect()
}

fn row_to_entity(row: &rusqlite::Row<'_>) -> rusqlite::Result<VesperResult<Entity>> {
    Ok((|| -> VesperResult<Entity> {
        let id: String = row.get(0)?;
        let entity_type: String = row.get(2)?;
        let created_at: String = row.get(6)?;
        let last_accessed: String = row.get(7)?;
        Ok(Entity {
            id: Uuid::parse_str(&id).map_err(|e| to_storage_err(e.to_string()))?,
            namespace: row.get(1)?,
            entity_type: entity_type
                .parse()
                .map_err(|e: String| to_storage_err(e))?,
            name: row.get(3)?,
            description: row.get(4)?,
            confidence: row.get(5)?,
            created_at: parse_dt(&created_at)?,
            last_accessed: parse_dt(&last_accessed)?,
            access_count: row.get::<_, i64>(8)? as u64,
        })
    })())
}

fn parse_dt(s: &str) -> VesperResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
