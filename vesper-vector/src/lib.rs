//! # vesper-vector
//!
//! The Vector Index: a thin HTTP client over a Qdrant-shaped
//! collection API. Upsert is synchronous with indexing — it does not return
//! until the point is queryable by `search`.

mod client;
mod transport;
mod wire;

pub use client::HttpVectorIndex;
pub use transport::TransportConfig;
