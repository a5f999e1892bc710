//! # vesper-semantic
//!
//! The Semantic Tier: a typed knowledge graph — entities,
//! relationships, facts — with temporal decay, pruning, and personalized
//! PageRank multi-hop retrieval over a `petgraph` traversal.

mod decay;
mod entities;
mod facts;
mod ppr;
mod preference;
mod pruning;
mod relationships;
mod tier;

pub use decay::apply_decay;
pub use ppr::{FactHop, PprHit, PprWithFactsHit};
pub use preference::{preference_query, PreferenceHit};
pub use pruning::{prune, PruneReport};
pub use tier::SemanticTier;
