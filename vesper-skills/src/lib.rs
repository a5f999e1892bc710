//! # vesper-skills
//!
//! The Skill Library: lazy-loaded summaries, invocation
//! detection, embedding/hybrid/analogical search, and co-occurrence
//! tracking over the Procedural Tier.

mod cooccurrence;
mod invocation;
mod library;
mod outcomes;
mod search;
mod summaries;

pub use cooccurrence::record_cooccurrence;
pub use invocation::{detect_invocation, InvocationMatch};
pub use library::SkillLibrary;
pub use search::{hybrid_search, relational_search, search_by_embedding, SkillHit};
pub use summaries::{load_full, summaries, SkillSummary};
