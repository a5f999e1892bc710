//! # vesper-working
//!
//! The Working Tier: an in-memory associative cache of the
//! last N conversations per namespace, keyed by a concurrent `DashMap`.
//! Reads are lock-free snapshots; writes are atomic per record.

mod ring;
mod tier;

pub use tier::WorkingTier;
