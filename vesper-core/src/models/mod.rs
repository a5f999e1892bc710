//! The data model. Every record type that crosses a crate
//! boundary lives here so `vesper-storage`, `vesper-semantic`,
//! `vesper-skills`, `vesper-conflict`, and `vesper-service` all program
//! against the same structs.

mod backup_metadata;
mod conflict;
mod conversation;
mod entity;
mod fact;
mod handoff;
mod namespace;
mod relationship;
mod retrieval;
mod skill;
mod skill_relationship;

pub use backup_metadata::{BackupMetadata, BackupType};
pub use conflict::{Conflict, ConflictType, ResolutionStatus, Severity};
pub use conversation::ConversationRecord;
pub use entity::{Entity, EntityType};
pub use fact::Fact;
pub use handoff::Handoff;
pub use namespace::NamespaceRecord;
pub use relationship::Relationship;
pub use retrieval::{Provenance, QueryClass, RetrievedResult, RouteDecision};
pub use skill::{CodeType, Skill};
pub use skill_relationship::SkillRelationship;
