//! v003: skills, skill_relationships.

use rusqlite::Connection;

use vesper_core::VesperResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VesperResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS skills (
            id              TEXT PRIMARY KEY,
            namespace       TEXT NOT NULL,
            name            TEXT NOT NULL,
            summary         TEXT NOT NULL,
            description     TEXT NOT NULL,
            category        TEXT NOT NULL,
            triggers        TEXT NOT NULL DEFAULT '[]',
            success_count   INTEGER NOT NULL DEFAULT 0,
            failure_count   INTEGER NOT NULL DEFAULT 0,
            avg_user_satisfaction REAL NOT NULL DEFAULT 0.0,
            code            TEXT,
            code_type       TEXT NOT NULL,
            prerequisites   TEXT NOT NULL DEFAULT '[]',
            uses_skills     TEXT NOT NULL DEFAULT '[]',
            used_by_skills  TEXT NOT NULL DEFAULT '[]',
            embedding       TEXT,
            is_archived     INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL,
            last_modified   TEXT NOT NULL,
            last_used       TEXT,
            version         INTEGER NOT NULL DEFAULT 1,
            UNIQUE (namespace, name)
        );

        CREATE INDEX IF NOT EXISTS idx_skills_namespace_category ON skills(namespace, category);

        CREATE TABLE IF NOT EXISTS skill_relationships (
            skill_id_1      TEXT NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
            skill_id_2      TEXT NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
            relationship_type TEXT NOT NULL,
            co_occurrence_count INTEGER NOT NULL DEFAULT 0,
            relational_vector  TEXT,
            PRIMARY KEY (skill_id_1, skill_id_2, relationship_type)
        );

        CREATE INDEX IF NOT EXISTS idx_skill_rel_1 ON skill_relationships(skill_id_1);
        CREATE INDEX IF NOT EXISTS idx_skill_rel_2 ON skill_relationships(skill_id_2);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
