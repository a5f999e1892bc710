//! Result merging: deduplicate by id, keep the highest score.

use std::collections::HashMap;

use vesper_core::models::RetrievedResult;

pub fn merge(results: Vec<RetrievedResult>) -> Vec<RetrievedResult> {
    let mut by_id: HashMap<String, RetrievedResult> = HashMap::new();
    for result in results {
        by_id
            .entry(result.id.clone())
            .and_modify(|existing| {
                if result.score > existing.score {
                    *existing = result.clone();
                }
            })
            .or_insert(result);
    }
    let mut merged: Vec<RetrievedResult> = by_id.into_values().collect();
    merged.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    merged
}
