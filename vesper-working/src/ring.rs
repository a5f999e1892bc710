//! A single namespace's ring of recent conversations: capacity- and
//! TTL-bounded.

use std::collections::VecDeque;

use chrono::{Duration, Utc};
use vesper_core::models::ConversationRecord;

#[derive(Debug, Clone, Default)]
pub struct NamespaceRing {
    records: VecDeque<ConversationRecord>,
}

impl NamespaceRing {
    /// Push a new record, then enforce both caps: drop anything past the
    /// TTL, then trim from the front until we're at or under `capacity`.
    pub fn push(&mut self, record: ConversationRecord, capacity: usize, ttl_secs: u64) {
        self.records.push_back(record);
        self.evict_expired(ttl_secs);
        while self.records.len() > capacity {
            self.records.pop_front();
        }
    }

    pub fn evict_expired(&mut self, ttl_secs: u64) {
        let cutoff = Utc::now() - Duration::seconds(ttl_secs as i64);
        self.records.retain(|r| r.timestamp >= cutoff);
    }

    pub fn iter_recent(&self) -> impl Iterator<Item = &ConversationRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn drain_consolidated(&mut self) -> Vec<ConversationRecord> {
        self.records.drain(..).collect()
    }

    pub fn set_embedding(&mut self, conversation_id: &str, embedding: Vec<f32>) -> bool {
        if let Some(record) = self.records.iter_mut().find(|r| r.conversation_id == conversation_id) {
            record.embedding = Some(embedding);
            true
        } else {
            false
        }
    }

    /// Remove a record by conversation id, for `delete_memory`. Returns
    /// whether a record was actually removed.
    pub fn remove(&mut self, conversation_id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.conversation_id != conversation_id);
        self.records.len() != before
    }
}
