//! Integration test: entity/relationship/fact CRUD over the real SQLite schema.

use vesper_core::models::{Entity, EntityType, Fact, Relationship};
use vesper_core::GraphStore;
use vesper_storage::StorageEngine;

#[test]
fn upsert_and_get_entity_by_name() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let entity = Entity::new("default", "Alice", EntityType::Person);

    let stored = engine.upsert_entity(&entity).unwrap();
    assert_eq!(stored.name, "Alice");

    let fetched = engine
        .get_entity_by_name("default", "Alice", EntityType::Person)
        .unwrap()
        .expect("entity should exist");
    assert_eq!(fetched.id, entity.id);
    assert_eq!(fetched.entity_type, EntityType::Person);
}

#[test]
fn upsert_entity_is_idempotent_on_name_and_type() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut entity = Entity::new("default", "Bob", EntityType::Person);
    engine.upsert_entity(&entity).unwrap();

    entity.description = Some("a colleague".to_string());
    engine.upsert_entity(&entity).unwrap();

    let all = engine.list_entities_by_type("default", EntityType::Person).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description.as_deref(), Some("a colleague"));
}

#[test]
fn relationship_roundtrips_with_evidence() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let a = engine.upsert_entity(&Entity::new("default", "Alice", EntityType::Person)).unwrap();
    let b = engine.upsert_entity(&Entity::new("default", "Widget", EntityType::Project)).unwrap();

    let rel = Relationship::new("default", a.id, b.id, "works_on", "mentioned in chat");
    engine.upsert_relationship(&rel).unwrap();

    let outgoing = engine.list_outgoing("default", a.id).unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].relation_type, "works_on");
    assert_eq!(outgoing[0].evidence, vec!["mentioned in chat".to_string()]);
}

#[test]
fn fact_confidence_can_be_lowered_by_conflict_resolution() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let entity = engine.upsert_entity(&Entity::new("default", "Alice", EntityType::Person)).unwrap();
    let fact = Fact::new("default", entity.id, "favorite_language", "Python");
    engine.upsert_fact(&fact).unwrap();

    engine.set_fact_confidence("default", fact.id, 0.4).unwrap();

    let facts = engine.list_facts("default", entity.id).unwrap();
    assert_eq!(facts.len(), 1);
    assert!((facts[0].confidence - 0.4).abs() < 1e-9);
}

#[test]
fn delete_by_id_cascades_relationships_and_facts() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let a = engine.upsert_entity(&Entity::new("default", "Alice", EntityType::Person)).unwrap();
    let b = engine.upsert_entity(&Entity::new("default", "Widget", EntityType::Project)).unwrap();
    engine
        .upsert_relationship(&Relationship::new("default", a.id, b.id, "works_on", "seed"))
        .unwrap();
    engine.upsert_fact(&Fact::new("default", a.id, "role", "engineer")).unwrap();

    let deleted = engine.delete_by_id("default", a.id).unwrap();
    assert!(deleted);
    assert!(engine.get_entity("default", a.id).unwrap().is_none());
    assert!(engine.list_outgoing("default", a.id).unwrap().is_empty());
    assert!(engine.list_facts("default", a.id).unwrap().is_empty());
}

#[test]
fn namespaces_registry_tracks_activity() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.touch_namespace("team-a").unwrap();
    engine.touch_namespace("team-b").unwrap();
    engine.touch_namespace("team-a").unwrap();

    let namespaces = engine.list_namespaces().unwrap();
    assert_eq!(namespaces.len(), 2);
}
