//! Invocation detection: classify a query string against the
//! skill library, first match wins across a fixed priority chain.

use std::sync::OnceLock;

use regex::Regex;
use vesper_core::{GraphStore, VesperResult};

#[derive(Debug, Clone)]
pub struct InvocationMatch {
    pub is_invocation: bool,
    pub skill_id: Option<uuid::Uuid>,
    pub confidence: f64,
    pub matched_trigger: Option<String>,
}

impl InvocationMatch {
    fn none() -> Self {
        Self { is_invocation: false, skill_id: None, confidence: 0.0, matched_trigger: None }
    }
}

fn explicit_invocation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(use|invoke|run|execute)\s+(skill\s+)?(.+)").unwrap())
}

fn previous_reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(like before|same as)\b").unwrap())
}

fn direct_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"skill_([a-f0-9]{6,})").unwrap())
}

/// Resolve a `skill_<hex prefix>` reference to the one skill in `namespace`
/// whose id (lowercase, hyphen-free) starts with that prefix. `None` if
/// nothing matches or the prefix is ambiguous.
fn resolve_direct_id(store: &dyn GraphStore, namespace: &str, prefix: &str) -> VesperResult<Option<uuid::Uuid>> {
    let skills = store.list_skills(namespace, None)?;
    let mut matches = skills.iter().filter(|s| s.id.simple().to_string().starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(skill), None) => Ok(Some(skill.id)),
        _ => Ok(None),
    }
}

/// Priority chain: explicit mention (0.95) > trigger substring
/// (0.75) > previous-reference (0.80) > direct id (1.0) > no match.
pub fn detect_invocation(
    store: &dyn GraphStore,
    namespace: &str,
    query: &str,
    most_recently_used: Option<uuid::Uuid>,
) -> VesperResult<InvocationMatch> {
    if let Some(caps) = explicit_invocation_re().captures(query) {
        if let Some(name_match) = caps.get(3) {
            let candidate_name = name_match.as_str().trim();
            let skills = store.list_skills(namespace, None)?;
            if let Some(skill) = skills.iter().find(|s| candidate_name.to_lowercase().contains(&s.name.to_lowercase())) {
                return Ok(InvocationMatch {
                    is_invocation: true,
                    skill_id: Some(skill.id),
                    confidence: 0.95,
                    matched_trigger: None,
                });
            }
        }
    }

    let skills = store.list_skills(namespace, None)?;
    let query_lower = query.to_lowercase();
    for skill in &skills {
        for trigger in &skill.triggers {
            if !trigger.is_empty() && query_lower.contains(&trigger.to_lowercase()) {
                return Ok(InvocationMatch {
                    is_invocation: true,
                    skill_id: Some(skill.id),
                    confidence: 0.75,
                    matched_trigger: Some(trigger.clone()),
                });
            }
        }
    }

    if previous_reference_re().is_match(query) {
        if let Some(id) = most_recently_used {
            return Ok(InvocationMatch { is_invocation: true, skill_id: Some(id), confidence: 0.80, matched_trigger: None });
        }
    }

    if let Some(caps) = direct_id_re().captures(query) {
        let whole = caps.get(0).unwrap().as_str().to_string();
        let prefix = caps.get(1).unwrap().as_str().to_lowercase();
        if let Some(skill_id) = resolve_direct_id(store, namespace, &prefix)? {
            return Ok(InvocationMatch {
                is_invocation: true,
                skill_id: Some(skill_id),
                confidence: 1.0,
                matched_trigger: Some(whole),
            });
        }
    }

    Ok(InvocationMatch::none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::models::Skill;
    use vesper_storage::StorageEngine;

    #[test]
    fn no_match_returns_is_invocation_false() {
        let store = StorageEngine::open_in_memory().unwrap();
        let result = detect_invocation(&store, "default", "what's the weather", None).unwrap();
        assert!(!result.is_invocation);
    }

    #[test]
    fn trigger_substring_matches_before_previous_reference() {
        let store = StorageEngine::open_in_memory().unwrap();
        let mut skill = Skill::new("default", "deploy", "s", "d", "ops");
        skill.triggers = vec!["deploy the app".to_string()];
        store.upsert_skill(&skill).unwrap();

        let result = detect_invocation(&store, "default", "please deploy the app now", None).unwrap();
        assert!(result.is_invocation);
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn direct_id_reference_resolves_to_the_matching_skill() {
        let store = StorageEngine::open_in_memory().unwrap();
        let skill = Skill::new("default", "deploy", "s", "d", "ops");
        store.upsert_skill(&skill).unwrap();
        let prefix = &skill.id.simple().to_string()[..8];

        let result = detect_invocation(&store, "default", &format!("do skill_{prefix}"), None).unwrap();
        assert!(result.is_invocation);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.skill_id, Some(skill.id));
    }

    #[test]
    fn direct_id_reference_with_no_matching_skill_is_not_an_invocation() {
        let store = StorageEngine::open_in_memory().unwrap();
        let result = detect_invocation(&store, "default", "do skill_ab12cd34", None).unwrap();
        assert!(!result.is_invocation);
        assert_eq!(result.skill_id, None);
    }
}
