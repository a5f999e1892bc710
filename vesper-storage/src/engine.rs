//! StorageEngine — owns the connection pool, runs migrations on open, and
//! implements `vesper_core::GraphStore` against SQLite.

use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use vesper_core::models::{
    BackupMetadata, Conflict, ConflictType, ConversationRecord, Entity, EntityType, Fact, Handoff,
    NamespaceRecord, Relationship, Skill, SkillRelationship,
};
use vesper_core::{GraphStore, VesperResult};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries;

/// The main storage engine. Owns the connection pool and implements the
/// full `GraphStore` surface.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// In-memory mode routes reads through the writer: a `:memory:` read
    /// pool connection is an isolated database that can't see the writer's
    /// changes.
    use_read_pool: bool,
}

impl StorageEngine {
    pub fn open(path: &Path) -> VesperResult<Self> {
        let pool = ConnectionPool::open(path, 4)?;
        let engine = Self { pool, use_read_pool: true };
        engine.initialize()?;
        Ok(engine)
    }

    pub fn open_in_memory() -> VesperResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self { pool, use_read_pool: false };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> VesperResult<()> {
        self.pool.writer.with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> VesperResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> VesperResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl GraphStore for StorageEngine {
    fn upsert_entity(&self, entity: &Entity) -> VesperResult<Entity> {
        self.pool.writer.with_conn_sync(|conn| queries::entity_ops::upsert(conn, entity))
    }

    fn get_entity(&self, namespace: &str, id: Uuid) -> VesperResult<Option<Entity>> {
        self.with_reader(|conn| queries::entity_ops::get(conn, namespace, id))
    }

    fn get_entity_by_name(
        &self,
        namespace: &str,
        name: &str,
        entity_type: EntityType,
    ) -> VesperResult<Option<Entity>> {
        self.with_reader(|conn| queries::entity_ops::get_by_name(conn, namespace, name, entity_type))
    }

    fn touch_entity(&self, namespace: &str, id: Uuid) -> VesperResult<()> {
        self.pool.writer.with_conn_sync(|conn| queries::entity_ops::touch(conn, namespace, id))
    }

    fn list_entities_by_type(&self, namespace: &str, entity_type: EntityType) -> VesperResult<Vec<Entity>> {
        self.with_reader(|conn| queries::entity_ops::list_by_type(conn, namespace, entity_type))
    }

    fn upsert_relationship(&self, relationship: &Relationship) -> VesperResult<Relationship> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::relationship_ops::upsert(conn, relationship))
    }

    fn get_relationship(
        &self,
        namespace: &str,
        source_id: Uuid,
        target_id: Uuid,
        relation_type: &str,
    ) -> VesperResult<Option<Relationship>> {
        self.with_reader(|conn| {
            queries::relationship_ops::get(conn, namespace, source_id, target_id, relation_type)
        })
    }

    fn list_relationships(&self, namespace: &str) -> VesperResult<Vec<Relationship>> {
        self.with_reader(|conn| queries::relationship_ops::list(conn, namespace))
    }

    fn list_outgoing(&self, namespace: &str, source_id: Uuid) -> VesperResult<Vec<Relationship>> {
        self.with_reader(|conn| queries::relationship_ops::list_outgoing(conn, namespace, source_id))
    }

    fn delete_relationship(&self, namespace: &str, id: Uuid) -> VesperResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::relationship_ops::delete(conn, namespace, id))
    }

    fn upsert_fact(&self, fact: &Fact) -> VesperResult<Fact> {
        self.pool.writer.with_conn_sync(|conn| queries::fact_ops::upsert(conn, fact))
    }

    fn list_facts(&self, namespace: &str, entity_id: Uuid) -> VesperResult<Vec<Fact>> {
        self.with_reader(|conn| queries::fact_ops::list_for_entity(conn, namespace, entity_id))
    }

    fn list_facts_by_property(
        &self,
        namespace: &str,
        entity_id: Uuid,
        property: &str,
    ) -> VesperResult<Vec<Fact>> {
        self.with_reader(|conn| {
            queries::fact_ops::list_for_property(conn, namespace, entity_id, property)
        })
    }

    fn set_fact_confidence(&self, namespace: &str, id: Uuid, confidence: f64) -> VesperResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::fact_ops::set_confidence(conn, namespace, id, confidence))
    }

    fn touched_entities_since(&self, namespace: &str, since: DateTime<Utc>) -> VesperResult<Vec<Uuid>> {
        self.with_reader(|conn| queries::fact_ops::entities_touched_since(conn, namespace, since))
    }

    fn upsert_conflict(&self, conflict: &Conflict) -> VesperResult<Option<Conflict>> {
        self.pool.writer.with_conn_sync(|conn| queries::conflict_ops::upsert(conn, conflict))
    }

    fn list_conflicts(&self, namespace: &str) -> VesperResult<Vec<Conflict>> {
        self.with_reader(|conn| queries::conflict_ops::list(conn, namespace))
    }

    fn conflict_exists(
        &self,
        namespace: &str,
        fact_id_1: Uuid,
        fact_id_2: Uuid,
        conflict_type: ConflictType,
    ) -> VesperResult<bool> {
        self.with_reader(|conn| {
            queries::conflict_ops::exists(conn, namespace, fact_id_1, fact_id_2, conflict_type)
        })
    }

    fn upsert_skill(&self, skill: &Skill) -> VesperResult<Skill> {
        self.pool.writer.with_conn_sync(|conn| queries::skill_ops::upsert(conn, skill))
    }

    fn get_skill(&self, namespace: &str, id: Uuid) -> VesperResult<Option<Skill>> {
        self.with_reader(|conn| queries::skill_ops::get(conn, namespace, id))
    }

    fn get_skill_by_name(&self, namespace: &str, name: &str) -> VesperResult<Option<Skill>> {
        self.with_reader(|conn| queries::skill_ops::get_by_name(conn, namespace, name))
    }

    fn list_skills(&self, namespace: &str, category: Option<&str>) -> VesperResult<Vec<Skill>> {
        self.with_reader(|conn| queries::skill_ops::list(conn, namespace, category))
    }

    fn upsert_skill_relationship(&self, rel: &SkillRelationship) -> VesperResult<SkillRelationship> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::skill_ops::upsert_relationship(conn, rel))
    }

    fn get_skill_relationship(
        &self,
        skill_id_1: Uuid,
        skill_id_2: Uuid,
    ) -> VesperResult<Option<SkillRelationship>> {
        self.with_reader(|conn| queries::skill_ops::get_relationship(conn, skill_id_1, skill_id_2))
    }

    fn list_skill_relationships(&self) -> VesperResult<Vec<SkillRelationship>> {
        self.with_reader(queries::skill_ops::list_relationships)
    }

    fn insert_backup_metadata(&self, backup: &BackupMetadata) -> VesperResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::namespace_ops::insert_backup_metadata(conn, backup))
    }

    fn touch_namespace(&self, namespace: &str) -> VesperResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::namespace_ops::touch_namespace(conn, namespace))
    }

    fn list_namespaces(&self) -> VesperResult<Vec<NamespaceRecord>> {
        self.with_reader(queries::namespace_ops::list_namespaces)
    }

    fn insert_handoff(&self, handoff: &Handoff) -> VesperResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::namespace_ops::insert_handoff(conn, handoff))
    }

    fn delete_by_id(&self, namespace: &str, id: Uuid) -> VesperResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::delete_ops::delete_by_id(conn, namespace, id))
    }

    fn insert_conversation(&self, record: &ConversationRecord) -> VesperResult<()> {
        self.pool.writer.with_conn_sync(|conn| queries::conversation_ops::insert(conn, record))
    }

    fn list_conversations_missing_embedding(&self, namespace: &str) -> VesperResult<Vec<ConversationRecord>> {
        self.with_reader(|conn| queries::conversation_ops::list_missing_embedding(conn, namespace))
    }

    fn set_conversation_embedding(&self, conversation_id: &str, embedding: &[f32]) -> VesperResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            queries::conversation_ops::set_embedding(conn, conversation_id, embedding)
        })
    }

    fn mark_conversation_consolidated(&self, conversation_id: &str) -> VesperResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::conversation_ops::mark_consolidated(conn, conversation_id))
    }

    fn delete_conversation(&self, conversation_id: &str) -> VesperResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::conversation_ops::delete(conn, conversation_id))
    }
}
