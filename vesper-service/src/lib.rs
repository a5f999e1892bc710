//! # vesper-service
//!
//! The Memory Service Facade: the single operation surface
//! every transport (MCP over stdio, a future HTTP surface) calls through.
//! Owns every engine handle explicitly and enforces the concurrency model
//! — per-namespace write serialization, independent reads.

mod ops;
mod service;
pub mod types;

pub use service::MemoryService;
