//! Content-hash keyed embedding cache, following `BaseMemory`'s blake3
//! content-hash idiom. Avoids re-embedding identical text within a process
//! lifetime; not persisted across restarts.

use std::collections::HashMap;
use std::sync::RwLock;

/// A small in-memory embedding cache keyed by the blake3 hash of the input
/// text. Bounded by `max_entries`; evicts the oldest entry (by insertion
/// order) once full.
pub struct EmbeddingCache {
    max_entries: usize,
    entries: RwLock<HashMap<String, Vec<f32>>>,
    order: RwLock<Vec<String>>,
}

impl EmbeddingCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            entries: RwLock::new(HashMap::new()),
            order: RwLock::new(Vec::new()),
        }
    }

    pub fn hash(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        let key = Self::hash(text);
        self.entries.read().unwrap().get(&key).cloned()
    }

    pub fn insert(&self, text: &str, embedding: Vec<f32>) {
        let key = Self::hash(text);
        let mut entries = self.entries.write().unwrap();
        let mut order = self.order.write().unwrap();

        if !entries.contains_key(&key) {
            if entries.len() >= self.max_entries {
                if let Some(oldest) = order.first().cloned() {
                    order.remove(0);
                    entries.remove(&oldest);
                }
            }
            order.push(key.clone());
        }
        entries.insert(key, embedding);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get_roundtrip() {
        let cache = EmbeddingCache::new(4);
        cache.insert("hello", vec![1.0, 2.0]);
        assert_eq!(cache.get("hello"), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn miss_returns_none() {
        let cache = EmbeddingCache::new(4);
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn evicts_oldest_once_full() {
        let cache = EmbeddingCache::new(2);
        cache.insert("a", vec![1.0]);
        cache.insert("b", vec![2.0]);
        cache.insert("c", vec![3.0]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("c"), Some(vec![3.0]));
    }
}
