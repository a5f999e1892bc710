//! Generic by-id deletion across every graph table, backing `delete(id)`.
//!
//! `id` may name an entity, a fact, a relationship, or a skill — the caller
//! doesn't know which. Entity deletion cascades to its relationships and
//! facts via `ON DELETE CASCADE`.

use rusqlite::{params, Connection};
use uuid::Uuid;

use vesper_core::VesperResult;

use crate::to_storage_err;

pub fn delete_by_id(conn: &Connection, namespace: &str, id: Uuid) -> VesperResult<bool> {
    for table in ["entities", "facts", "relationships", "skills"] {
        let rows = conn
            .execute(
                &format!("DELETE FROM {table} WHERE namespace = ?1 AND id = ?2"),
                params![namespace, id.to_string()],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        if rows > 0 {
            return Ok(true);
        }
    }
    Ok(false)
}
