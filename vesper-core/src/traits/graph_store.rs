use chrono::{DateTime, Utc};

use crate::errors::VesperResult;
use crate::models::{
    BackupMetadata, Conflict, ConversationRecord, Entity, EntityType, Fact, Handoff,
    NamespaceRecord, Relationship, Skill, SkillRelationship,
};

/// The semantic tier's persistence contract. Implemented by
/// `vesper-storage::StorageEngine` over SQLite; the rest of the system only
/// ever sees this trait — an injected handle, never a process-wide global.
pub trait GraphStore: Send + Sync {
    // --- Entities ---
    fn upsert_entity(&self, entity: &Entity) -> VesperResult<Entity>;
    fn get_entity(&self, namespace: &str, id: uuid::Uuid) -> VesperResult<Option<Entity>>;
    fn get_entity_by_name(
        &self,
        namespace: &str,
        name: &str,
        entity_type: EntityType,
    ) -> VesperResult<Option<Entity>>;
    fn touch_entity(&self, namespace: &str, id: uuid::Uuid) -> VesperResult<()>;
    fn list_entities_by_type(
        &self,
        namespace: &str,
        entity_type: EntityType,
    ) -> VesperResult<Vec<Entity>>;

    // --- Relationships ---
    fn upsert_relationship(&self, relationship: &Relationship) -> VesperResult<Relationship>;
    fn get_relationship(
        &self,
        namespace: &str,
        source_id: uuid::Uuid,
        target_id: uuid::Uuid,
        relation_type: &str,
    ) -> VesperResult<Option<Relationship>>;
    fn list_relationships(&self, namespace: &str) -> VesperResult<Vec<Relationship>>;
    fn list_outgoing(&self, namespace: &str, source_id: uuid::Uuid) -> VesperResult<Vec<Relationship>>;
    fn delete_relationship(&self, namespace: &str, id: uuid::Uuid) -> VesperResult<()>;

    // --- Facts ---
    fn upsert_fact(&self, fact: &Fact) -> VesperResult<Fact>;
    fn list_facts(&self, namespace: &str, entity_id: uuid::Uuid) -> VesperResult<Vec<Fact>>;
    fn list_facts_by_property(
        &self,
        namespace: &str,
        entity_id: uuid::Uuid,
        property: &str,
    ) -> VesperResult<Vec<Fact>>;
    fn set_fact_confidence(&self, namespace: &str, id: uuid::Uuid, confidence: f64) -> VesperResult<()>;
    fn touched_entities_since(
        &self,
        namespace: &str,
        since: DateTime<Utc>,
    ) -> VesperResult<Vec<uuid::Uuid>>;

    // --- Conflicts ---
    fn upsert_conflict(&self, conflict: &Conflict) -> VesperResult<Option<Conflict>>;
    fn list_conflicts(&self, namespace: &str) -> VesperResult<Vec<Conflict>>;
    fn conflict_exists(
        &self,
        namespace: &str,
        fact_id_1: uuid::Uuid,
        fact_id_2: uuid::Uuid,
        conflict_type: crate::models::ConflictType,
    ) -> VesperResult<bool>;

    // --- Skills ---
    fn upsert_skill(&self, skill: &Skill) -> VesperResult<Skill>;
    fn get_skill(&self, namespace: &str, id: uuid::Uuid) -> VesperResult<Option<Skill>>;
    fn get_skill_by_name(&self, namespace: &str, name: &str) -> VesperResult<Option<Skill>>;
    fn list_skills(&self, namespace: &str, category: Option<&str>) -> VesperResult<Vec<Skill>>;
    fn upsert_skill_relationship(&self, rel: &SkillRelationship) -> VesperResult<SkillRelationship>;
    fn get_skill_relationship(
        &self,
        skill_id_1: uuid::Uuid,
        skill_id_2: uuid::Uuid,
    ) -> VesperResult<Option<SkillRelationship>>;
    fn list_skill_relationships(&self) -> VesperResult<Vec<SkillRelationship>>;

    // --- Backup metadata ---
    fn insert_backup_metadata(&self, backup: &BackupMetadata) -> VesperResult<()>;

    // --- Namespaces & handoffs ---
    fn touch_namespace(&self, namespace: &str) -> VesperResult<()>;
    fn list_namespaces(&self) -> VesperResult<Vec<NamespaceRecord>>;
    fn insert_handoff(&self, handoff: &Handoff) -> VesperResult<()>;

    // --- Deletion ---
    fn delete_by_id(&self, namespace: &str, id: uuid::Uuid) -> VesperResult<bool>;

    // --- Conversation audit log (consolidation source, supplement) ---
    fn insert_conversation(&self, record: &ConversationRecord) -> VesperResult<()>;
    fn list_conversations_missing_embedding(
        &self,
        namespace: &str,
    ) -> VesperResult<Vec<ConversationRecord>>;
    fn set_conversation_embedding(&self, conversation_id: &str, embedding: &[f32]) -> VesperResult<()>;
    fn mark_conversation_consolidated(&self, conversation_id: &str) -> VesperResult<()>;
    fn delete_conversation(&self, conversation_id: &str) -> VesperResult<bool>;
}
