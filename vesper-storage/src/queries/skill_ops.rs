//! Skill and skill-relationship CRUD.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use vesper_core::models::{CodeType, Skill, SkillRelationship};
use vesper_core::VesperResult;

use crate::to_storage_err;

const COLUMNS: &str = "id, namespace, name, summary, description, category, triggers, \
     success_count, failure_count, avg_user_satisfaction, code, code_type, \
     prerequisites, uses_skills, used_by_skills, embedding, is_archived, \
     created_at, last_modified, last_used, version";

pub fn upsert(conn: &Connection, skill: &Skill) -> VesperResult<Skill> {
    let triggers = serde_json::to_string(&skill.triggers).map_err(|e| to_storage_err(e.to_string()))?;
    let prerequisites = serde_json::to_string(&skill.prerequisites).map_err(|e| to_storage_err(e.to_string()))?;
    let uses_skills = serde_json::to_string(&skill.uses_skills).map_err(|e| to_storage_err(e.to_string()))?;
    let used_by_skills = serde_json::to_string(&skill.used_by_skills).map_err(|e| to_storage_err(e.to_string()))?;
    let embedding = skill
        .embedding
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        &format!(
            "INSERT INTO skills ({COLUMNS}) VALUES
                (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,?21)
             ON CONFLICT(namespace, name) DO UPDATE SET
                summary = excluded.summary,
                description = excluded.description,
                category = excluded.category,
                triggers = excluded.triggers,
                success_count = excluded.success_count,
                failure_count = excluded.failure_count,
                avg_user_satisfaction = excluded.avg_user_satisfaction,
                code = excluded.code,
                code_type = excluded.code_type,
                prerequisites = excluded.prerequisites,
                uses_skills = excluded.uses_skills,
                used_by_skills = excluded.used_by_skills,
                embedding = excluded.embedding,
                is_archived = excluded.is_archived,
                last_modified = excluded.last_modified,
                last_used = excluded.last_used,
                version = excluded.version"
        ),
        params![
            skill.id.to_string(),
            skill.namespace,
            skill.name,
            skill.summary,
            skill.description,
            skill.category,
            triggers,
            skill.success_count as i64,
            skill.failure_count as i64,
            skill.avg_user_satisfaction,
            skill.code,
            code_type_str(skill.code_type),
            prerequisites,
            uses_skills,
            used_by_skills,
            embedding,
            skill.is_archived as i32,
            skill.created_at.to_rfc3339(),
            skill.last_modified.to_rfc3339(),
            skill.last_used.map(|t| t.to_rfc3339()),
            skill.version,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    get_by_name(conn, &skill.namespace, &skill.name)?
        .ok_or_else(|| to_storage_err("skill vanished immediately after upsert"))
}

pub fn get(conn: &Connection, namespace: &str, id: Uuid) -> VesperResult<Option<Skill>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM skills WHERE namespace = ?1 AND id = ?2"),
        params![namespace, id.to_string()],
        row_to_skill,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .transpose()
}

pub fn get_by_name(conn: &Connection, namespace: &str, name: &str) -> VesperResult<Option<Skill>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM skills WHERE namespace = ?1 AND name = ?2"),
        params![namespace, name],
        row_to_skill,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .transpose()
}

pub fn list(conn: &Connection, namespace: &str, category: Option<&str>) -> VesperResult<Vec<Skill>> {
    let rows = match category {
        Some(cat) => {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {COLUMNS} FROM skills WHERE namespace = ?1 AND category = ?2 AND is_archived = 0"
                ))
                .map_err(|e| to_storage_err(e.to_string()))?;
            stmt.query_map(params![namespace, cat], row_to_skill)
                .map_err(|e| to_storage_err(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| to_storage_err(e.to_string()))?
        }
        None => {
            let mut stmt = conn
                .prepare(&format!("SELECT {COLUMNS} FROM skills WHERE namespace = ?1 AND is_archived = 0"))
                .map_err(|e| to_storage_err(e.to_string()))?;
            stmt.query_map(params![namespace], row_to_skill)
                .map_err(|e| to_storage_err(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| to_storage_err(e.to_string()))?
        }
    };
    rows.into_iter().collect()
}

pub fn upsert_relationship(conn: &Connection, rel: &SkillRelationship) -> VesperResult<SkillRelationship> {
    let vector = rel
        .relational_vector
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO skill_relationships
            (skill_id_1, skill_id_2, relationship_type, co_occurrence_count, relational_vector)
         VALUES (?1,?2,?3,?4,?5)
         ON CONFLICT(skill_id_1, skill_id_2, relationship_type) DO UPDATE SET
            co_occurrence_count = excluded.co_occurrence_count,
            relational_vector = excluded.relational_vector",
        params![
            rel.skill_id_1.to_string(),
            rel.skill_id_2.to_string(),
            rel.relationship_type,
            rel.co_occurrence_count,
            vector,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rel.clone())
}

pub fn get_relationship(
    conn: &Connection,
    skill_id_1: Uuid,
    skill_id_2: Uuid,
) -> VesperResult<Option<SkillRelationship>> {
    let (a, b) = SkillRelationship::canonical_pair(skill_id_1, skill_id_2);
    conn.query_row(
        "SELECT skill_id_1, skill_id_2, relationship_type, co_occurrence_count, relational_vector
         FROM skill_relationships WHERE skill_id_1 = ?1 AND skill_id_2 = ?2",
        params![a.to_string(), b.to_string()],
        row_to_skill_relationship,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .transpose()
}

pub fn list_relationships(conn: &Connection) -> VesperResult<Vec<SkillRelationship>> {
    let mut stmt = conn
        .prepare(
            "SELECT skill_id_1, skill_id_2, relationship_type, co_occurrence_count, relational_vector
             FROM skill_relationships",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], row_to_skill_relationship)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?
        .into_iter()
        .collect()
}

fn code_type_str(t: CodeType) -> &'static str {
    match t {
        CodeType::Inline => "inline",
        CodeType::Reference => "reference",
    }
}

fn parse_code_type(s: &str) -> VesperResult<CodeType> {
    match s {
        "inline" => Ok(CodeType::Inline),
        "reference" => Ok(CodeType::Reference),
        other => Err(to_storage_err(format!("invalid code_type '{other}'"))),
    }
}

fn row_to_skill(row: &rusqlite::Row<'_>) -> rusqlite::Result<VesperResult<Skill>> {
    Ok((|| -> VesperResult<Skill> {
        let id: String = row.get(0)?;
        let triggers: String = row.get(6)?;
        let code_type: String = row.get(11)?;
        let prerequisites: String = row.get(12)?;
        let uses_skills: String = row.get(13)?;
        let used_by_skills: String = row.get(14)?;
        let embedding: Option<String> = row.get(15)?;
        let created_at: String = row.get(17)?;
        let last_modified: String = row.get(18)?;
        let last_used: Option<String> = row.get(19)?;

        Ok(Skill {
            id: Uuid::parse_str(&id).map_err(|e| to_storage_err(e.to_string()))?,
            namespace: row.get(1)?,
            name: row.get(2)?,
            summary: row.get(3)?,
            description: row.get(4)?,
            category: row.get(5)?,
            triggers: serde_json::from_str(&triggers).map_err(|e| to_storage_err(e.to_string()))?,
            success_count: row.get::<_, i64>(7)? as u64,
            failure_count: row.get::<_, i64>(8)? as u64,
            avg_user_satisfaction: row.get(9)?,
            code: row.get(10)?,
            code_type: parse_code_type(&code_type)?,
            prerequisites: parse_uuid_list(&prerequisites)?,
            uses_skills: parse_uuid_list(&uses_skills)?,
            used_by_skills: parse_uuid_list(&used_by_skills)?,
            embedding: embedding
                .map(|s| serde_json::from_str(&s))
                .transpose()
                .map_err(|e| to_storage_err(e.to_string()))?,
            is_archived: row.get::<_, i32>(16)? != 0,
            created_at: parse_dt(&created_at)?,
            last_modified: parse_dt(&last_modified)?,
            last_used: last_used.as_deref().map(parse_dt).transpose()?,
            version: row.get(20)?,
        })
    })())
}

fn row_to_skill_relationship(row: &rusqlite::Row<'_>) -> rusqlite::Result<VesperResult<SkillRelationship>> {
    Ok((|| -> VesperResult<SkillRelationship> {
        let skill_id_1: String = row.get(0)?;
        let skill_id_2: String = row.get(1)?;
        let vector: Option<String> = row.get(4)?;
        Ok(SkillRelationship {
            skill_id_1: Uuid::parse_str(&skill_id_1).map_err(|e| to_storage_err(e.to_string()))?,
            skill_id_2: Uuid::parse_str(&skill_id_2).map_err(|e| to_storage_err(e.to_string()))?,
            relationship_type: row.get(2)?,
            co_occurrence_count: row.get(3)?,
            relational_vector: vector
                .map(|s| serde_json::from_str(&s))
                .transpose()
                .map_err(|e| to_storage_err(e.to_string()))?,
        })
    })())
}

fn parse_uuid_list(json: &str) -> VesperResult<Vec<Uuid>> {
    let strs: Vec<String> = serde_json::from_str(json).map_err(|e| to_storage_err(e.to_string()))?;
    strs.into_iter()
        .map(|s| Uuid::parse_str(&s).map_err(|e| to_storage_err(e.to_string())))
        .collect()
}

fn parse_dt(s: &str) -> VesperResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
