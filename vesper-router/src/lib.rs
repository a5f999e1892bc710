//! # vesper-router
//!
//! The Smart Router: classifies each query with a
//! regex-first dispatch table, always probes the Working Tier fast path
//! first, and falls back to the tier matching the query's class, merging
//! results by id with provenance.

mod classify;
mod dispatch;
mod entity_lookup;
mod merge;
mod router;

pub use router::SmartRouter;
