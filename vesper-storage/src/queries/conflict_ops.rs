//! Conflict CRUD. Detection is idempotent: `upsert` is a
//! no-op `INSERT OR IGNORE` keyed on the unordered `(fact_id_1, fact_id_2,
//! conflict_type)` identity, so re-running the detector never duplicates a
//! conflict record.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use vesper_core::models::{Conflict, ConflictType};
use vesper_core::VesperResult;

use crate::to_storage_err;

const COLUMNS: &str =
    "id, namespace, fact_id_1, fact_id_2, conflict_type, description, severity, resolution_status, detected_at";

pub fn upsert(conn: &Connection, conflict: &Conflict) -> VesperResult<Option<Conflict>> {
    let (id1, id2, _) = conflict.identity_key();
    let rows = conn
        .execute(
            &format!(
                "INSERT OR IGNORE INTO conflicts ({COLUMNS}) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)"
            ),
            params![
                conflict.id.to_string(),
                conflict.namespace,
                id1.to_string(),
                id2.to_string(),
                conflict_type_str(conflict.conflict_type),
                conflict.description,
                severity_str(conflict.severity),
                resolution_str(conflict.resolution_status),
                conflict.detected_at.to_rfc3339(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Ok(None);
    }
    Ok(Some(conflict.clone()))
}

pub fn exists(
    conn: &Connection,
    namespace: &str,
    fact_id_1: Uuid,
    fact_id_2: Uuid,
    conflict_type: ConflictType,
) -> VesperResult<bool> {
    let (id1, id2) = if fact_id_1 <= fact_id_2 { (fact_id_1, fact_id_2) } else { (fact_id_2, fact_id_1) };
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM conflicts WHERE namespace = ?1 AND fact_id_1 = ?2 AND fact_id_2 = ?3 AND conflict_type = ?4",
            params![namespace, id1.to_string(), id2.to_string(), conflict_type_str(conflict_type)],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count > 0)
}

pub fn list(conn: &Connection, namespace: &str) -> VesperResult<Vec<Conflict>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM conflicts WHERE namespace = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![namespace], row_to_conflict)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?
        .into_iter()
        .collect()
}

fn conflict_type_str(t: ConflictType) -> &'static str {
    match t {
        ConflictType::Temporal => "temporal",
        ConflictType::Contradiction => "contradiction",
        ConflictType::PreferenceShift => "preference_shift",
    }
}

fn parse_conflict_type(s: &str) -> VesperResult<ConflictType> {
    match s {
        "temporal" => Ok(ConflictType::Temporal),
        "contradiction" => Ok(ConflictType::Contradiction),
        "preference_shift" => Ok(ConflictType::PreferenceShift),
        other => Err(to_storage_err(format!("invalid conflict_type '{other}'"))),
    }
}

fn severity_str(s: vesper_core::models::Severity) -> &'static str {
    use vesper_core::models::Severity;
    match s {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "high",
    }
}

fn parse_severity(s: &str) -> VesperResult<vesper_core::models::Severity> {
    use vesper_core::models::Severity;
    match s {
        "low" => Ok(Severity::Low),
        "medium" => Ok(Severity::Medium),
        "high" => Ok(Severity::High),
        other => Err(to_storage_err(format!("invalid severity '{other}'"))),
    }
}

fn resolution_str(s: vesper_core::models::ResolutionStatus) -> &'static str {
    use vesper_core::models::ResolutionStatus;
    match s {
        ResolutionStatus::Open => "open",
        ResolutionStatus::Acknowledged => "acknowledged",
        ResolutionStatus::Superseded => "superseded",
    }
}

fn parse_resolution(s: &str) -> VesperResult<vesper_core::models::ResolutionStatus> {
    use vesper_core::models::ResolutionStatus;
    match s {
        "open" => Ok(ResolutionStatus::Open),
        "acknowledged" => Ok(ResolutionStatus::Acknowledged),
        "superseded" => Ok(ResolutionStatus::Superseded),
        other => Err(to_storage_err(format!("invalid resolution_status '{other}'"))),
    }
}

fn row_to_conflict(row: &rusqlite::Row<'_>) -> rusqlite::Result<VesperResult<Conflict>> {
    Ok((|| -> VesperResult<Conflict> {
        let id: String = row.get(0)?;
        let fact_id_1: String = row.get(2)?;
        let fact_id_2: String = row.get(3)?;
        let conflict_type: String = row.get(4)?;
        let severity: String = row.get(6)?;
        let resolution_status: String = row.get(7)?;
        let detected_at: String = row.get(8)?;
        Ok(Conflict {
            id: Uuid::parse_str(&id).map_err(|e| to_storage_err(e.to_string()))?,
            namespace: row.get(1)?,
            fact_id_1: Uuid::parse_str(&fact_id_1).map_err(|e| to_storage_err(e.to_string()))?,
            fact_id_2: Uuid::parse_str(&fact_id_2).map_err(|e| to_storage_err(e.to_string()))?,
            conflict_type: parse_conflict_type(&conflict_type)?,
            description: row.get(5)?,
            severity: parse_severity(&severity)?,
            resolution_status: parse_resolution(&resolution_status)?,
            detected_at: parse_dt(&detected_at)?,
        })
    })())
}

fn parse_dt(s: &str) -> VesperResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
