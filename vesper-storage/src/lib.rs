//! # vesper-storage
//!
//! SQLite persistence for the semantic tier graph: entities, relationships,
//! facts, conflicts, skills, skill relationships, backup metadata,
//! namespaces, and handoffs. `StorageEngine` implements `vesper_core::GraphStore`
//! and is the only thing in the workspace that speaks SQL.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use vesper_core::errors::StorageError;

/// Wrap a rusqlite error as a `StorageError::SqliteError`.
pub(crate) fn to_storage_err(message: impl Into<String>) -> vesper_core::VesperError {
    StorageError::SqliteError { message: message.into() }.into()
}
