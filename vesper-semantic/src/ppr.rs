//! Personalized PageRank over the entity/relationship graph.
//!
//! The graph is rebuilt from `GraphStore::list_relationships` on every call
//! (no cached `petgraph` structure is persisted — the semantic tier is small
//! enough per namespace that rebuilding is cheap and avoids keeping a second
//! source of truth in sync with SQLite), scoped to a single namespace per
//! call.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use vesper_core::constants::{PPR_CONVERGENCE_EPSILON, PPR_DAMPING, PPR_MAX_DEPTH, PPR_MAX_ITERATIONS, PPR_REVERSE_EDGE_WEIGHT};
use vesper_core::models::Fact;
use vesper_core::{Deadline, GraphStore, VesperResult};

/// A single visited node in a personalized PageRank run.
#[derive(Debug, Clone)]
pub struct PprHit {
    pub entity_id: uuid::Uuid,
    pub score: f64,
}

/// A fact encountered while hopping across an edge during a "with facts" PPR
/// run, carrying the path of relation types that led to it.
#[derive(Debug, Clone)]
pub struct FactHop {
    pub fact: Fact,
    pub path: Vec<String>,
}

/// A PPR hit enriched with the top facts reachable through its incoming edges.
#[derive(Debug, Clone)]
pub struct PprWithFactsHit {
    pub entity_id: uuid::Uuid,
    pub score: f64,
    pub facts: Vec<FactHop>,
}

struct EntityGraph {
    graph: DiGraph<uuid::Uuid, (String, f64)>,
    index_of: HashMap<uuid::Uuid, NodeIndex>,
}

fn build_graph(store: &dyn GraphStore, namespace: &str) -> VesperResult<EntityGraph> {
    let relationships = store.list_relationships(namespace)?;
    let mut graph = DiGraph::new();
    let mut index_of: HashMap<uuid::Uuid, NodeIndex> = HashMap::new();

    let mut node_index = |graph: &mut DiGraph<uuid::Uuid, (String, f64)>, index_of: &mut HashMap<uuid::Uuid, NodeIndex>, id: uuid::Uuid| -> NodeIndex {
        *index_of.entry(id).or_insert_with(|| graph.add_node(id))
    };

    for rel in &relationships {
        let src = node_index(&mut graph, &mut index_of, rel.source_id);
        let tgt = node_index(&mut graph, &mut index_of, rel.target_id);
        graph.add_edge(src, tgt, (rel.relation_type.clone(), rel.strength));
        // Reverse edge at half weight so PPR can still flow against the
        // stated direction of a relationship, just more weakly.
        graph.add_edge(tgt, src, (rel.relation_type.clone(), rel.strength * PPR_REVERSE_EDGE_WEIGHT));
    }

    Ok(EntityGraph { graph, index_of })
}

/// Run personalized PageRank seeded on `seed_entities`, returning the top
/// `limit` visited nodes (other than the seeds themselves) by score. Checks
/// `deadline` before the graph rebuild and between power-iteration steps,
/// returning `Cancelled` once it elapses.
pub fn personalized_page_rank(
    store: &dyn GraphStore,
    namespace: &str,
    seed_entities: &[uuid::Uuid],
    limit: usize,
    deadline: Deadline,
) -> VesperResult<Vec<PprHit>> {
    if seed_entities.is_empty() {
        return Ok(Vec::new());
    }
    deadline.check()?;

    let entity_graph = build_graph(store, namespace)?;
    let scores = run_ppr(&entity_graph, seed_entities, deadline)?;
    let reachable = reachable_within_depth(&entity_graph, seed_entities, PPR_MAX_DEPTH);

    let seeds: std::collections::HashSet<_> = seed_entities.iter().copied().collect();
    let mut hits: Vec<PprHit> = scores
        .into_iter()
        .filter(|(id, _)| !seeds.contains(id))
        .filter(|(id, _)| entity_graph.index_of.get(id).is_some_and(|idx| reachable.contains(idx)))
        .map(|(entity_id, score)| PprHit { entity_id, score })
        .collect();

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(limit);
    Ok(hits)
}

/// Every node reachable from any seed within `max_depth` hops (BFS over the
/// same directed edges PPR walks, including the added reverse edges).
/// Bounds which entities may appear in `personalized_page_rank`'s results —
/// the power iteration itself propagates mass across the whole graph, but
/// only hits within this set are returned.
fn reachable_within_depth(entity_graph: &EntityGraph, seed_entities: &[uuid::Uuid], max_depth: usize) -> std::collections::HashSet<NodeIndex> {
    use std::collections::VecDeque;

    let mut visited = std::collections::HashSet::new();
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();

    for seed in seed_entities {
        if let Some(&idx) = entity_graph.index_of.get(seed) {
            if visited.insert(idx) {
                queue.push_back((idx, 0));
            }
        }
    }

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for edge in entity_graph.graph.edges_directed(node, Direction::Outgoing) {
            let next = edge.target();
            if visited.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    visited
}

/// Like [`personalized_page_rank`], but for each visited node attaches the
/// facts reachable through edges within `PPR_MAX_DEPTH` hops of a seed,
/// ordered by confidence × recency, along with the relation-type path.
pub fn personalized_page_rank_with_facts(
    store: &dyn GraphStore,
    namespace: &str,
    seed_entities: &[uuid::Uuid],
    limit: usize,
    facts_per_hit: usize,
    deadline: Deadline,
) -> VesperResult<Vec<PprWithFactsHit>> {
    let hits = personalized_page_rank(store, namespace, seed_entities, limit, deadline)?;
    let entity_graph = build_graph(store, namespace)?;

    let mut out = Vec::with_capacity(hits.len());
    for hit in hits {
        deadline.check()?;
        let path = shortest_relation_path(&entity_graph, seed_entities, hit.entity_id);
        let mut facts = store.list_facts(namespace, hit.entity_id)?;
        facts.sort_by(|a, b| {
            let a_score = a.confidence * recency_weight(a.valid_from);
            let b_score = b.confidence * recency_weight(b.valid_from);
            b_score.partial_cmp(&a_score).unwrap_or(std::cmp::Ordering::Equal)
        });
        facts.truncate(facts_per_hit);

        out.push(PprWithFactsHit {
            entity_id: hit.entity_id,
            score: hit.score,
            facts: facts.into_iter().map(|fact| FactHop { fact, path: path.clone() }).collect(),
        });
    }
    Ok(out)
}

fn recency_weight(valid_from: Option<chrono::DateTime<chrono::Utc>>) -> f64 {
    match valid_from {
        Some(ts) => {
            let age_days = (chrono::Utc::now() - ts).num_seconds().max(0) as f64 / 86_400.0;
            (-age_days / vesper_core::constants::DECAY_HALF_LIFE_DAYS).exp()
        }
        None => 1.0,
    }
}

/// Breadth-first search from any seed to `target`, capped at `PPR_MAX_DEPTH`
/// hops, returning the sequence of relation types traversed.
fn shortest_relation_path(entity_graph: &EntityGraph, seed_entities: &[uuid::Uuid], target: uuid::Uuid) -> Vec<String> {
    use std::collections::VecDeque;

    let Some(&target_idx) = entity_graph.index_of.get(&target) else {
        return Vec::new();
    };

    let mut queue: VecDeque<(NodeIndex, Vec<String>)> = VecDeque::new();
    let mut visited = std::collections::HashSet::new();

    for seed in seed_entities {
        if let Some(&idx) = entity_graph.index_of.get(seed) {
            queue.push_back((idx, Vec::new()));
            visited.insert(idx);
        }
    }

    while let Some((node, path)) = queue.pop_front() {
        if node == target_idx {
            return path;
        }
        if path.len() >= PPR_MAX_DEPTH {
            continue;
        }
        for edge in entity_graph.graph.edges_directed(node, Direction::Outgoing) {
            let next = edge.target();
            if visited.insert(next) {
                let mut next_path = path.clone();
                next_path.push(edge.weight().0.clone());
                queue.push_back((next, next_path));
            }
        }
    }

    Vec::new()
}

/// Power-iteration personalized PageRank with teleport mass on `seed_entities`,
/// damping `PPR_DAMPING`, converging when the L1 delta between iterations
/// drops below `PPR_CONVERGENCE_EPSILON` or after `PPR_MAX_ITERATIONS`. Checks
/// `deadline` once per iteration.
fn run_ppr(entity_graph: &EntityGraph, seed_entities: &[uuid::Uuid], deadline: Deadline) -> VesperResult<Vec<(uuid::Uuid, f64)>> {
    let n = entity_graph.graph.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let seed_indices: Vec<NodeIndex> = seed_entities
        .iter()
        .filter_map(|id| entity_graph.index_of.get(id).copied())
        .collect();
    if seed_indices.is_empty() {
        return Ok(Vec::new());
    }

    let teleport_mass = 1.0 / seed_indices.len() as f64;
    let mut scores = vec![0.0_f64; n];
    for idx in &seed_indices {
        scores[idx.index()] = teleport_mass;
    }

    // Precompute each node's total outgoing edge weight for normalization.
    let out_weight: Vec<f64> = entity_graph
        .graph
        .node_indices()
        .map(|idx| {
            entity_graph
                .graph
                .edges_directed(idx, Direction::Outgoing)
                .map(|e| e.weight().1)
                .sum::<f64>()
        })
        .collect();

    for _ in 0..PPR_MAX_ITERATIONS {
        deadline.check()?;
        let mut next = vec![0.0_f64; n];
        for idx in entity_graph.graph.node_indices() {
            let i = idx.index();
            let mut incoming_mass = 0.0;
            for edge in entity_graph.graph.edges_directed(idx, Direction::Incoming) {
                let src = edge.source();
                let src_out_weight = out_weight[src.index()];
                if src_out_weight > 0.0 {
                    incoming_mass += scores[src.index()] * (edge.weight().1 / src_out_weight);
                }
            }
            let teleport = if seed_indices.contains(&idx) { teleport_mass } else { 0.0 };
            next[i] = (1.0 - PPR_DAMPING) * teleport + PPR_DAMPING * incoming_mass;
        }

        let delta: f64 = scores.iter().zip(next.iter()).map(|(a, b)| (a - b).abs()).sum();
        scores = next;
        if delta < PPR_CONVERGENCE_EPSILON {
            break;
        }
    }

    Ok(entity_graph
        .graph
        .node_indices()
        .map(|idx| (entity_graph.graph[idx], scores[idx.index()]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::models::{EntityType, Relationship};
    use vesper_core::Deadline;
    use vesper_storage::StorageEngine;

    fn seed_entity(store: &StorageEngine, namespace: &str, name: &str) -> uuid::Uuid {
        let entity = vesper_core::models::Entity::new(namespace, name, EntityType::Concept);
        store.upsert_entity(&entity).unwrap().id
    }

    #[test]
    fn empty_seed_set_returns_empty() {
        let store = StorageEngine::open_in_memory().unwrap();
        let hits = personalized_page_rank(&store, "default", &[], 10, Deadline::none()).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn ranks_direct_neighbor_above_unconnected_node() {
        let store = StorageEngine::open_in_memory().unwrap();
        let seed = seed_entity(&store, "default", "seed");
        let neighbor = seed_entity(&store, "default", "neighbor");
        let stranger = seed_entity(&store, "default", "stranger");

        let rel = Relationship::new("default", seed, neighbor, "relates_to", "evidence");
        store.upsert_relationship(&rel).unwrap();

        let hits = personalized_page_rank(&store, "default", &[seed], 10, Deadline::none()).unwrap();
        let neighbor_score = hits.iter().find(|h| h.entity_id == neighbor).map(|h| h.score).unwrap_or(0.0);
        let stranger_score = hits.iter().find(|h| h.entity_id == stranger).map(|h| h.score).unwrap_or(0.0);
        assert!(neighbor_score > stranger_score);
    }

    #[test]
    fn nodes_beyond_max_depth_are_excluded_even_with_nonzero_score() {
        let store = StorageEngine::open_in_memory().unwrap();
        let seed = seed_entity(&store, "default", "seed");
        let hop1 = seed_entity(&store, "default", "hop1");
        let hop2 = seed_entity(&store, "default", "hop2");
        let hop3 = seed_entity(&store, "default", "hop3");

        // seed -> hop1 -> hop2 -> hop3: hop3 is 3 hops out, beyond PPR_MAX_DEPTH (2).
        store.upsert_relationship(&Relationship::new("default", seed, hop1, "relates_to", "evidence")).unwrap();
        store.upsert_relationship(&Relationship::new("default", hop1, hop2, "relates_to", "evidence")).unwrap();
        store.upsert_relationship(&Relationship::new("default", hop2, hop3, "relates_to", "evidence")).unwrap();

        let hits = personalized_page_rank(&store, "default", &[seed], 10, Deadline::none()).unwrap();
        assert!(hits.iter().any(|h| h.entity_id == hop1));
        assert!(hits.iter().any(|h| h.entity_id == hop2));
        assert!(!hits.iter().any(|h| h.entity_id == hop3));
    }
}
