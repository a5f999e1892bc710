//! # vesper-core
//!
//! Foundation crate for the Vesper memory service. Defines the shared data
//! model, error taxonomy, configuration, constants, and the trait seams
//! (`EmbeddingClient`, `VectorIndex`, `GraphStore`) that every other crate
//! in the workspace programs against.

pub mod config;
pub mod constants;
mod deadline;
pub mod errors;
pub mod models;
pub mod traits;
pub mod vector_math;

// Re-export the most commonly used types at the crate root.
pub use config::VesperConfig;
pub use deadline::Deadline;
pub use errors::{ErrorKind, VesperError, VesperResult};
pub use traits::{EmbeddingClient, GraphStore, VectorHit, VectorIndex, VectorStats};
