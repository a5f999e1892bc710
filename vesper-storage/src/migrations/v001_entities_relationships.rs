//! v001: entities, relationships — the semantic-tier graph.

use rusqlite::Connection;

use vesper_core::VesperResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VesperResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entities (
            id          TEXT PRIMARY KEY,
            namespace   TEXT NOT NULL,
            entity_type TEXT NOT NULL,
            name        TEXT NOT NULL,
            description TEXT,
            confidence  REAL NOT NULL DEFAULT 1.0,
            created_at  TEXT NOT NULL,
            last_accessed TEXT NOT NULL,
            access_count  INTEGER NOT NULL DEFAULT 0,
            UNIQUE (namespace, entity_type, name)
        );

        CREATE INDEX IF NOT EXISTS idx_entities_namespace ON entities(namespace);
        CREATE INDEX IF NOT EXISTS idx_entities_namespace_type ON entities(namespace, entity_type);

        CREATE TABLE IF NOT EXISTS relationships (
            id              TEXT PRIMARY KEY,
            namespace       TEXT NOT NULL,
            source_id       TEXT NOT NULL REFERENCES entities(id) ON DELETE CASCADE,
            target_id       TEXT NOT NULL REFERENCES entities(id) ON DELETE CASCADE,
            relation_type   TEXT NOT NULL,
            strength        REAL NOT NULL DEFAULT 1.0,
            evidence        TEXT NOT NULL DEFAULT '[]',
            access_count    INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL,
            last_reinforced TEXT NOT NULL,
            UNIQUE (namespace, source_id, target_id, relation_type)
        );

        CREATE INDEX IF NOT EXISTS idx_rel_namespace_source ON relationships(namespace, source_id);
        CREATE INDEX IF NOT EXISTS idx_rel_namespace_target ON relationships(namespace, target_id);
        CREATE INDEX IF NOT EXISTS idx_rel_strength ON relationships(strength);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
