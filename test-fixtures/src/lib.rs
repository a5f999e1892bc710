//! Test fixture loader for Vesper golden scenarios and benchmark datasets.
//!
//! Provides typed deserialization of fixture JSON files and helper functions
//! for loading them in integration tests across the workspace.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // If we're inside a crate (e.g. vesper-consolidation), go up to workspace root.
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect()
}

/// A deterministic, dependency-free embedding: blake3 hash of the text,
/// expanded to `dims` floats in `[-1, 1]` and L2-normalized. Used by
/// benchmark and integration fixtures that need a stand-in for the
/// Embedding Client without reaching out over HTTP .
pub fn deterministic_embedding(text: &str, dims: usize) -> Vec<f32> {
    let hash = blake3::hash(text.as_bytes());
    let bytes = hash.as_bytes();
    let mut v: Vec<f32> = (0..dims).map(|i| (bytes[i % 32] as f32 / 255.0) * 2.0 - 1.0).collect();
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_golden_consolidation_files_exist() {
        let files = [
            "golden/consolidation/cluster_basic.json",
            "golden/consolidation/preference_extraction.json",
            "golden/consolidation/pruning_rule.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn all_golden_routing_files_exist() {
        let files = [
            "golden/routing/fast_path_hit.json",
            "golden/routing/working_tier_miss_dispatch.json",
            "golden/routing/hybrid_rrf_merge.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn all_golden_conflict_files_exist() {
        let files = ["golden/conflict/direct_conflict.json", "golden/conflict/idempotent_rerun.json"];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn all_golden_skills_files_exist() {
        let files = ["golden/skills/cooccurrence_threshold.json", "golden/skills/outcome_decay.json"];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn all_benchmark_files_exist() {
        let files = ["benchmarks/memories_100.json", "benchmarks/queries_20.json"];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn all_integration_files_exist() {
        let files = ["integration/full_lifecycle.json", "integration/degraded_embedding.json"];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn all_golden_files_parse_as_json() {
        let dirs = ["golden/consolidation", "golden/routing", "golden/conflict", "golden/skills"];
        let mut total = 0;
        for dir in &dirs {
            for file in list_fixtures(dir) {
                let content = std::fs::read_to_string(&file)
                    .unwrap_or_else(|e| panic!("Failed to read {}: {}", file.display(), e));
                let _: serde_json::Value = serde_json::from_str(&content)
                    .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
                total += 1;
            }
        }
        assert_eq!(total, 10, "Expected 10 golden fixture files, found {}", total);
    }

    #[test]
    fn benchmark_memories_have_correct_count() {
        let m100: serde_json::Value = load_fixture("benchmarks/memories_100.json");
        assert_eq!(m100["count"], 100);
        assert_eq!(m100["memories"].as_array().unwrap().len(), 100);
    }

    #[test]
    fn benchmark_queries_have_20_entries() {
        let queries: serde_json::Value = load_fixture("benchmarks/queries_20.json");
        assert_eq!(queries["queries"].as_array().unwrap().len(), 20);
    }

    #[test]
    fn deterministic_embedding_is_unit_normalized() {
        let v = deterministic_embedding("repeatable input", 1024);
        assert_eq!(v.len(), 1024);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-3, "norm = {norm}");
    }

    #[test]
    fn deterministic_embedding_is_stable_across_calls() {
        let a = deterministic_embedding("same text", 64);
        let b = deterministic_embedding("same text", 64);
        assert_eq!(a, b);
    }
}
