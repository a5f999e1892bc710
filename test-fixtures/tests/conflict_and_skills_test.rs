//! Drives `vesper-conflict` and `vesper-skills` against the golden/conflict
//! and golden/skills fixtures: each fixture describes a scenario in data,
//! this test replays it through the real engines.

use vesper_conflict::ConflictDetector;
use vesper_core::config::{DecayConfig, SkillConfig};
use vesper_core::models::{Entity, EntityType, Fact, Skill};
use vesper_skills::SkillLibrary;
use vesper_storage::StorageEngine;
use test_fixtures::deterministic_embedding;

fn entity_type_from_fixture(s: &str) -> EntityType {
    s.parse().unwrap_or(EntityType::Concept)
}

#[test]
fn direct_conflict_fixture_ceils_confidence() {
    let fixture: serde_json::Value = test_fixtures::load_fixture("golden/conflict/direct_conflict.json");
    let store = StorageEngine::open_in_memory().unwrap();

    let entity = Entity::new("default", fixture["entity_name"].as_str().unwrap(), entity_type_from_fixture(fixture["entity_type"].as_str().unwrap()));
    store.upsert_entity(&entity).unwrap();

    for f in fixture["facts"].as_array().unwrap() {
        let mut fact = Fact::new("default", entity.id, f["property"].as_str().unwrap(), f["value"].as_str().unwrap());
        fact.confidence = f["confidence"].as_f64().unwrap();
        store.upsert_fact(&fact).unwrap();
    }

    let detector = ConflictDetector::new(&DecayConfig::default());
    let detected = detector.detect_for_entity(&store, "default", entity.id).unwrap();

    assert_eq!(!detected.is_empty(), fixture["expect"]["conflict_detected"].as_bool().unwrap());
    let expected_ceiling = fixture["expect"]["confidence_after"].as_f64().unwrap();
    let facts = store.list_facts("default", entity.id).unwrap();
    assert!(facts.iter().all(|f| f.confidence <= expected_ceiling));
}

#[test]
fn idempotent_rerun_fixture_never_duplicates_a_conflict() {
    let fixture: serde_json::Value = test_fixtures::load_fixture("golden/conflict/idempotent_rerun.json");
    let store = StorageEngine::open_in_memory().unwrap();

    let entity = Entity::new("default", fixture["entity_name"].as_str().unwrap(), entity_type_from_fixture(fixture["entity_type"].as_str().unwrap()));
    store.upsert_entity(&entity).unwrap();

    for f in fixture["facts"].as_array().unwrap() {
        let mut fact = Fact::new("default", entity.id, f["property"].as_str().unwrap(), f["value"].as_str().unwrap());
        fact.confidence = f["confidence"].as_f64().unwrap();
        store.upsert_fact(&fact).unwrap();
    }

    let detector = ConflictDetector::new(&DecayConfig::default());
    let runs = fixture["runs"].as_u64().unwrap();

    let mut after_first = 0usize;
    for i in 0..runs {
        detector.detect_for_entity(&store, "default", entity.id).unwrap();
        if i == 0 {
            after_first = store.list_conflicts("default").unwrap().len();
        }
    }

    let after_second = store.list_conflicts("default").unwrap().len();
    assert_eq!(after_first as u64, fixture["expect"]["conflicts_after_first_run"].as_u64().unwrap());
    assert_eq!(after_second as u64, fixture["expect"]["conflicts_after_second_run"].as_u64().unwrap());
}

#[test]
fn cooccurrence_threshold_fixture_gates_the_relational_vector() {
    let fixture: serde_json::Value = test_fixtures::load_fixture("golden/skills/cooccurrence_threshold.json");
    let threshold = fixture["cooccurrence_threshold"].as_u64().unwrap() as u32;
    let store = std::sync::Arc::new(StorageEngine::open_in_memory().unwrap());
    let library = SkillLibrary::new(store.clone(), SkillConfig { cooccurrence_threshold: threshold, ..SkillConfig::default() });

    for pair in fixture["pairs"].as_array().unwrap() {
        let mut skill_a = Skill::new("default", pair["skill_a"].as_str().unwrap(), "s", "d", "ops");
        skill_a.embedding = Some(deterministic_embedding(&skill_a.name, 32));
        let mut skill_b = Skill::new("default", pair["skill_b"].as_str().unwrap(), "s", "d", "ops");
        skill_b.embedding = Some(deterministic_embedding(&skill_b.name, 32));
        let a = library.register(&skill_a).unwrap();
        let b = library.register(&skill_b).unwrap();

        let count = pair["cooccurrence_count"].as_u64().unwrap();
        let mut relationship = None;
        for _ in 0..count {
            relationship = Some(library.record_cooccurrence("default", a.id, b.id).unwrap());
        }

        let expect_vector = pair["expect_vector"].as_bool().unwrap();
        let has_vector = relationship.unwrap().relational_vector.is_some();
        assert_eq!(has_vector, expect_vector, "pair {:?}", pair);
    }
}

#[test]
fn outcome_decay_fixture_leaves_quality_below_a_pure_success_run() {
    let fixture: serde_json::Value = test_fixtures::load_fixture("golden/skills/outcome_decay.json");
    let store = std::sync::Arc::new(StorageEngine::open_in_memory().unwrap());
    let library = SkillLibrary::new(store.clone(), SkillConfig::default());

    let skill = library.register(&Skill::new("default", fixture["skill_name"].as_str().unwrap(), "s", "d", "ops")).unwrap();

    let mut current = skill.clone();
    for outcome in fixture["outcomes"].as_array().unwrap() {
        let success = outcome["success"].as_bool().unwrap();
        current = if success {
            let satisfaction = outcome["satisfaction"].as_f64();
            library.record_success("default", skill.id, satisfaction).unwrap()
        } else {
            library.record_failure("default", skill.id).unwrap()
        };
    }

    let initial_satisfaction = fixture["initial_satisfaction"].as_f64().unwrap();
    if fixture["expect"]["quality_score_after_lower_than_initial_satisfaction"].as_bool().unwrap() {
        assert!(current.quality_score() < initial_satisfaction);
    }
}
