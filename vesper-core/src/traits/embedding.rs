use crate::errors::VesperResult;

/// Text → unit vector embedding provider.
///
/// Implementations must return a unit-normalized vector whose dimension
/// matches `dimensions()`. Callers that can tolerate a missing embedding
/// (store paths) should treat `Unavailable`/`Timeout` as "proceed without
/// an embedding" rather than propagate the error.
///
/// Methods are blocking: the only suspension points in this system are I/O
///, and the façade dispatches each request to a worker via
/// `tokio::task::spawn_blocking` rather than threading `async` through every
/// call site.
pub trait EmbeddingClient: Send + Sync {
    fn embed(&self, text: &str) -> VesperResult<Vec<f32>>;
    fn embed_batch(&self, texts: &[String]) -> VesperResult<Vec<Vec<f32>>>;
    fn dimensions(&self) -> usize;
    fn health(&self) -> bool;
}
