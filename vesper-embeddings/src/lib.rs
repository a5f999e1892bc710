//! # vesper-embeddings
//!
//! The Embedding Client: text → 1024-dim unit vector via an
//! external HTTP service. Retries with exponential backoff, probes health,
//! and degrades gracefully — callers that can tolerate a missing embedding
//! must still succeed ("Degradation").

mod cache;
mod client;
mod transport;

pub use cache::EmbeddingCache;
pub use client::HttpEmbeddingClient;
pub use transport::{EmbeddingTransport, TransportConfig};
