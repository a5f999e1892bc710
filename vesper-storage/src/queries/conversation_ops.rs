//! Conversation audit log, written at consolidation time.
//!
//! The Working Tier itself is pure in-memory (`vesper-working`'s `DashMap`);
//! this table is what the Consolidation Pipeline reads back from to find
//! records whose embedding degraded at store time.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use vesper_core::models::ConversationRecord;
use vesper_core::VesperResult;

use crate::to_storage_err;

const COLUMNS: &str =
    "conversation_id, namespace, timestamp, full_text, embedding, key_entities, topics, user_intent, is_decision, consolidated_at";

pub fn insert(conn: &Connection, record: &ConversationRecord) -> VesperResult<()> {
    let embedding = record
        .embedding
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let key_entities =
        serde_json::to_string(&record.key_entities).map_err(|e| to_storage_err(e.to_string()))?;
    let topics = serde_json::to_string(&record.topics).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        &format!(
            "INSERT INTO conversations ({COLUMNS}) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,NULL)
             ON CONFLICT(conversation_id) DO UPDATE SET embedding = excluded.embedding"
        ),
        params![
            record.conversation_id,
            record.namespace,
            record.timestamp.to_rfc3339(),
            record.full_text,
            embedding,
            key_entities,
            topics,
            record.user_intent,
            record.is_decision as i64,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Conversations with no embedding, awaiting back-fill.
pub fn list_missing_embedding(conn: &Connection, namespace: &str) -> VesperResult<Vec<ConversationRecord>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM conversations WHERE namespace = ?1 AND embedding IS NULL AND consolidated_at IS NULL"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![namespace], row_to_record)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?
        .into_iter()
        .collect()
}

pub fn set_embedding(conn: &Connection, conversation_id: &str, embedding: &[f32]) -> VesperResult<()> {
    let json = serde_json::to_string(embedding).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "UPDATE conversations SET embedding = ?2 WHERE conversation_id = ?1",
        params![conversation_id, json],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn mark_consolidated(conn: &Connection, conversation_id: &str) -> VesperResult<()> {
    conn.execute(
        "UPDATE conversations SET consolidated_at = ?2 WHERE conversation_id = ?1",
        params![conversation_id, Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Delete a conversation row by id (`delete`). Returns whether a
/// row was actually removed.
pub fn delete(conn: &Connection, conversation_id: &str) -> VesperResult<bool> {
    let rows = conn
        .execute(
            "DELETE FROM conversations WHERE conversation_id = ?1",
            params![conversation_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows > 0)
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<VesperResult<ConversationRecord>> {
    Ok((|| -> VesperResult<ConversationRecord> {
        let timestamp: String = row.get(2)?;
        let embedding: Option<String> = row.get(4)?;
        let key_entities: String = row.get(5)?;
        let topics: String = row.get(6)?;
        let is_decision: i64 = row.get(8)?;
        Ok(ConversationRecord {
            conversation_id: row.get(0)?,
            namespace: row.get(1)?,
            timestamp: parse_dt(&timestamp)?,
            full_text: row.get(3)?,
            embedding: embedding
                .map(|s| serde_json::from_str(&s))
                .transpose()
                .map_err(|e| to_storage_err(e.to_string()))?,
            key_entities: serde_json::from_str(&key_entities).map_err(|e| to_storage_err(e.to_string()))?,
            topics: serde_json::from_str(&topics).map_err(|e| to_storage_err(e.to_string()))?,
            user_intent: row.get(7)?,
            is_decision: is_decision != 0,
        })
    })())
}

fn parse_dt(s: &str) -> VesperResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
