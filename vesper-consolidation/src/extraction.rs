//! Lightweight text extraction for consolidation phase 2.
//!
//! This is a regex heuristic, not an NLP model: capitalized multi-word runs
//! stand in for key entities, and the configured preference pattern
//! (`prefer|like|want|favor`) flags preference-bearing sentences. Good
//! enough to seed the graph; the Semantic Tier's reinforcement over time is
//! what actually builds confidence.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

fn capitalized_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Z][a-zA-Z0-9]*(?:\s+[A-Z][a-zA-Z0-9]*)*)\b").unwrap())
}

fn sentence_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+\s*").unwrap())
}

/// Extract candidate entity names: runs of capitalized words, deduplicated,
/// excluding a single leading word (likely sentence-initial capitalization).
pub fn extract_key_entities(text: &str) -> HashSet<String> {
    let mut names = HashSet::new();
    for sentence in sentence_split_re().split(text) {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        for m in capitalized_run_re().find_iter(sentence) {
            let candidate = m.as_str();
            let starts_sentence = words.first().map(|w| sentence.trim_start().starts_with(w) && *w == candidate.split_whitespace().next().unwrap_or("")).unwrap_or(false);
            if candidate.split_whitespace().count() == 1 && starts_sentence {
                continue;
            }
            names.insert(candidate.to_string());
        }
    }
    names
}

/// Extract sentences matching the configured preference pattern
/// (`prefer|like|want|favor`).
pub fn extract_preference_phrases(text: &str, preference_pattern: &Regex) -> Vec<String> {
    sentence_split_re()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty() && preference_pattern.is_match(s))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_multi_word_proper_noun() {
        let entities = extract_key_entities("We discussed the Drift Project roadmap today.");
        assert!(entities.contains("Drift Project"));
    }

    #[test]
    fn preference_pattern_matches_sentence() {
        let pattern = Regex::new(r"(?i)\b(prefer|like|want|favor)\b").unwrap();
        let phrases = extract_preference_phrases("I prefer dark mode. The weather is nice.", &pattern);
        assert_eq!(phrases.len(), 1);
        assert!(phrases[0].contains("prefer"));
    }
}
