//! Structured logging setup: `LOG_LEVEL` drives an `EnvFilter`, JSON output
//! for machine-readable logs.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. Call once from `vesper-mcp::main`.
/// Defaults to `info` when `LOG_LEVEL` is unset or invalid.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .init();
}

/// Initialize tracing with an explicit filter string, for tests or embedding
/// the service inside another process that already owns a subscriber.
pub fn init_tracing_with_filter(filter: &str) {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::new(filter)).with_target(true).json().init();
}
