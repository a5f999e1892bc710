//! `vesper-mcp`: the MCP stdio transport. Reads one JSON-RPC
//! request per line on stdin, dispatches it against a single in-process
//! `MemoryService`, and writes one JSON-RPC response per line on stdout.
//! Wiring a host agent over stdio is the transport's whole job; everything
//! else lives in `vesper-service` and below.

mod rpc;
mod tools;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use vesper_conflict::ConflictDetector;
use vesper_consolidation::ConsolidationPipeline;
use vesper_core::{VectorIndex, VesperConfig};
use vesper_embeddings::HttpEmbeddingClient;
use vesper_router::SmartRouter;
use vesper_scheduler::Scheduler;
use vesper_semantic::SemanticTier;
use vesper_service::MemoryService;
use vesper_skills::SkillLibrary;
use vesper_storage::StorageEngine;
use vesper_vector::HttpVectorIndex;
use vesper_working::WorkingTier;

fn build_service(config: &VesperConfig) -> anyhow::Result<Arc<MemoryService>> {
    let store = Arc::new(StorageEngine::open(&config.graph_db_path)?);

    let embedder = Arc::new(HttpEmbeddingClient::new(
        vesper_embeddings::TransportConfig {
            base_url: config.embedding.service_url.clone(),
            timeout: std::time::Duration::from_millis(config.embedding.timeout_ms),
            max_retries: config.embedding.retries,
            ..Default::default()
        },
        config.embedding.dimensions,
    ));

    let vector = Arc::new(HttpVectorIndex::new(vesper_vector::TransportConfig {
        base_url: config.vector_index.service_url.clone(),
        api_key: config.vector_index.api_key.clone(),
        ..Default::default()
    }));
    vector.init_collection(&config.vector_index.collection, config.vector_index.dimensions)?;

    let working = Arc::new(WorkingTier::new(embedder.clone(), config.working_tier.clone()));
    let semantic = Arc::new(SemanticTier::new(store.clone(), config.decay.clone()));
    let skills = Arc::new(SkillLibrary::new(store.clone(), config.skill.clone()));
    let conflicts = Arc::new(ConflictDetector::new(&config.decay));
    let consolidation = Arc::new(ConsolidationPipeline::new(
        store.clone(),
        embedder.clone(),
        working.clone(),
        semantic.clone(),
        skills.clone(),
        conflicts.clone(),
        &config.consolidation,
    )?);
    let router = Arc::new(SmartRouter::new(
        store.clone(),
        embedder.clone(),
        vector.clone(),
        working.clone(),
        semantic.clone(),
        skills.clone(),
        config.router.clone(),
    ));

    Ok(Arc::new(MemoryService::new(
        store,
        embedder,
        vector,
        working,
        semantic,
        skills,
        conflicts,
        consolidation,
        router,
        config.vector_index.collection.clone(),
    )))
}

/// Blocking stdio loop: one JSON-RPC request per line in, one response per
/// line out. Runs on a dedicated blocking thread so the scheduler's async
/// loop keeps making progress while a request is decoded.
async fn serve_stdio(service: Arc<MemoryService>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let request: rpc::RpcRequest = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                let response = rpc::RpcResponse::err(serde_json::Value::Null, 1, format!("malformed request: {e}"));
                write_response(&mut stdout, &response)?;
                continue;
            }
        };

        let response = handle_request(&service, request).await;
        write_response(&mut stdout, &response)?;
    }

    Ok(())
}

async fn handle_request(service: &MemoryService, request: rpc::RpcRequest) -> rpc::RpcResponse {
    if request.method != "tools/call" {
        return rpc::RpcResponse::err(request.id, 1, format!("unsupported method '{}'", request.method));
    }

    let params = match request.params {
        Some(params) => params,
        None => return rpc::RpcResponse::err(request.id, 1, "missing params for tools/call"),
    };

    match tools::dispatch(service, &params.name, params.arguments).await {
        Ok(result) => rpc::RpcResponse::ok(request.id, result),
        Err(err) => rpc::error_response(request.id, err),
    }
}

fn write_response(stdout: &mut io::Stdout, response: &rpc::RpcResponse) -> anyhow::Result<()> {
    let encoded = serde_json::to_string(response)?;
    writeln!(stdout, "{encoded}")?;
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vesper_observability::tracing_setup::init_tracing();

    let config = VesperConfig::from_env();
    let service = match build_service(&config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!(error = %e, "vesper-mcp: failed to initialize engines");
            std::process::exit(1);
        }
    };

    let scheduler_handle = Scheduler::new(service.clone(), config.consolidation.clone()).spawn();

    tokio::select! {
        result = serve_stdio(service) => {
            scheduler_handle.abort();
            result
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("vesper-mcp: received interrupt, shutting down");
            scheduler_handle.abort();
            std::process::exit(130);
        }
    }
}
