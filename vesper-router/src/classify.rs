//! Regex-first query classification, sub-millisecond by
//! construction: five compiled patterns tried in a fixed order, with
//! `Complex` as the catch-all.

use std::sync::OnceLock;

use regex::Regex;
use vesper_core::models::QueryClass;

fn skill_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(like before|same as|how you)\b").unwrap())
}

fn factual_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(what is|who is|where is)\b").unwrap())
}

fn temporal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(last week|yesterday|recently|this (morning|week))\b").unwrap())
}

fn preference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(prefer|want|favorite)\b").unwrap())
}

fn project_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(project|working on|building)\b").unwrap())
}

/// Classify `query` into the five-way split, falling back to `Complex`.
/// Order matters: `skill` is checked first since "how you"
/// phrasing would otherwise also read as `factual`.
pub fn classify(query: &str) -> QueryClass {
    if skill_re().is_match(query) {
        QueryClass::Skill
    } else if factual_re().is_match(query) {
        QueryClass::Factual
    } else if temporal_re().is_match(query) {
        QueryClass::Temporal
    } else if preference_re().is_match(query) {
        QueryClass::Preference
    } else if project_re().is_match(query) {
        QueryClass::Project
    } else {
        QueryClass::Complex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_class() {
        assert_eq!(classify("same as last time"), QueryClass::Skill);
        assert_eq!(classify("what is the capital of France"), QueryClass::Factual);
        assert_eq!(classify("what did we discuss yesterday"), QueryClass::Temporal);
        assert_eq!(classify("I prefer dark mode"), QueryClass::Preference);
        assert_eq!(classify("how's the Drift project going"), QueryClass::Project);
        assert_eq!(classify("tell me something interesting"), QueryClass::Complex);
    }

    #[test]
    fn skill_pattern_takes_priority_over_factual() {
        assert_eq!(classify("how you solved this last time"), QueryClass::Skill);
    }
}
