use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::EMBEDDING_DIM;

/// A Working Tier record. Holds the full text of a stored
/// conversational episode plus the lightweight annotations the Semantic
/// Tier extracts during consolidation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub conversation_id: String,
    pub namespace: String,
    pub timestamp: DateTime<Utc>,
    pub full_text: String,
    /// `None` when the Embedding Client degraded at store time;
    /// such records are flagged for back-fill on the next consolidation pass.
    pub embedding: Option<Vec<f32>>,
    pub key_entities: HashSet<String>,
    pub topics: HashSet<String>,
    pub user_intent: String,
    /// Set by `store_decision`: consolidation reinforces this record's
    /// relationships with a higher bump than an ordinary conversation, so
    /// decisions decay slower.
    pub is_decision: bool,
}

impl ConversationRecord {
    pub fn new(namespace: impl Into<String>, full_text: impl Into<String>) -> Self {
        Self {
            conversation_id: uuid::Uuid::new_v4().to_string(),
            namespace: namespace.into(),
            timestamp: Utc::now(),
            full_text: full_text.into(),
            embedding: None,
            key_entities: HashSet::new(),
            topics: HashSet::new(),
            user_intent: String::new(),
            is_decision: false,
        }
    }

    /// `|embedding| = 1 ± ε` and dimension matches the configured vector size
    /// (invariant).
    pub fn has_valid_embedding(&self) -> bool {
        match &self.embedding {
            Some(v) => v.len() == EMBEDDING_DIM,
            None => true, // absence is valid; degraded writes are allowed.
        }
    }
}
