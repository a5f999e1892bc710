pub mod embedding;
pub mod graph_store;
pub mod vector_index;

pub use embedding::EmbeddingClient;
pub use graph_store::GraphStore;
pub use vector_index::{is_valid_collection_name, VectorHit, VectorIndex, VectorStats};
