//! Versioned schema migrations, applied in order and tracked in
//! `schema_version` so `run_migrations` is safe to call on every startup.

mod v001_entities_relationships;
mod v002_facts_conflicts;
mod v003_skills;
mod v004_namespaces_handoffs_backups;

use rusqlite::Connection;

use vesper_core::VesperResult;

use crate::to_storage_err;

type Migration = fn(&Connection) -> VesperResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_entities_relationships::migrate),
    (2, v002_facts_conflicts::migrate),
    (3, v003_skills::migrate),
    (4, v004_namespaces_handoffs_backups::migrate),
];

/// Run every migration not yet recorded in `schema_version`, in order.
pub fn run_migrations(conn: &Connection) -> VesperResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current: u32 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            to_storage_err(format!("migration v{version} failed: {e}"))
        })?;
        conn.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?1, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
            rusqlite::params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::info!(version, "applied migration");
    }

    Ok(())
}

/// The latest schema version this build knows about.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|(v, _)| *v).unwrap_or(0)
}
