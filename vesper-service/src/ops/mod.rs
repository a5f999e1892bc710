//! Synchronous operation implementations, run inside `MemoryService`'s
//! `spawn_blocking` wrapper, split one module per concern.

pub mod delete;
pub mod share_context;
pub mod skills;
pub mod stats;
pub mod store;
