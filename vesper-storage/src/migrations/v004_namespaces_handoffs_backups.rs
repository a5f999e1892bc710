//! v004: namespaces, handoffs, backup_metadata, conversations — the
//! bookkeeping tables the data model implies but no [MODULE] owns directly
//!.

use rusqlite::Connection;

use vesper_core::VesperResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VesperResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS namespaces (
            name        TEXT PRIMARY KEY,
            created_at  TEXT NOT NULL,
            last_active TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS handoffs (
            id              TEXT PRIMARY KEY,
            from_namespace  TEXT NOT NULL,
            to_namespace    TEXT NOT NULL,
            filter          TEXT,
            copied_count    INTEGER NOT NULL,
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_handoffs_to ON handoffs(to_namespace);

        CREATE TABLE IF NOT EXISTS backup_metadata (
            id                  TEXT PRIMARY KEY,
            namespace           TEXT NOT NULL,
            backup_timestamp    TEXT NOT NULL,
            backup_type         TEXT NOT NULL,
            status              TEXT NOT NULL,
            memory_count        INTEGER NOT NULL,
            entity_count        INTEGER NOT NULL,
            relationship_count  INTEGER NOT NULL,
            expires_at          TEXT NOT NULL,
            notes               TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_backup_namespace ON backup_metadata(namespace, backup_timestamp);

        CREATE TABLE IF NOT EXISTS conversations (
            conversation_id TEXT PRIMARY KEY,
            namespace       TEXT NOT NULL,
            timestamp       TEXT NOT NULL,
            full_text       TEXT NOT NULL,
            embedding       TEXT,
            key_entities    TEXT NOT NULL DEFAULT '[]',
            topics          TEXT NOT NULL DEFAULT '[]',
            user_intent     TEXT NOT NULL DEFAULT '',
            is_decision     INTEGER NOT NULL DEFAULT 0,
            consolidated_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_conversations_namespace ON conversations(namespace, timestamp);
        CREATE INDEX IF NOT EXISTS idx_conversations_unconsolidated ON conversations(namespace, consolidated_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
