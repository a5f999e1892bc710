//! v002: facts, conflicts.

use rusqlite::Connection;

use vesper_core::VesperResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VesperResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS facts (
            id          TEXT PRIMARY KEY,
            namespace   TEXT NOT NULL,
            entity_id   TEXT NOT NULL REFERENCES entities(id) ON DELETE CASCADE,
            property    TEXT NOT NULL,
            value       TEXT NOT NULL,
            confidence  REAL NOT NULL DEFAULT 1.0,
            valid_from  TEXT,
            valid_until TEXT,
            source_conversation TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_facts_entity ON facts(namespace, entity_id);
        CREATE INDEX IF NOT EXISTS idx_facts_property ON facts(namespace, entity_id, property);

        CREATE TABLE IF NOT EXISTS conflicts (
            id          TEXT PRIMARY KEY,
            namespace   TEXT NOT NULL,
            fact_id_1   TEXT NOT NULL REFERENCES facts(id) ON DELETE CASCADE,
            fact_id_2   TEXT NOT NULL REFERENCES facts(id) ON DELETE CASCADE,
            conflict_type TEXT NOT NULL,
            description TEXT NOT NULL,
            severity    TEXT NOT NULL,
            resolution_status TEXT NOT NULL DEFAULT 'open',
            detected_at TEXT NOT NULL,
            UNIQUE (namespace, fact_id_1, fact_id_2, conflict_type)
        );

        CREATE INDEX IF NOT EXISTS idx_conflicts_namespace ON conflicts(namespace, resolution_status);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
