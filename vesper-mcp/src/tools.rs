//! Tool argument decoding and dispatch, at the minimum fidelity this
//! surface requires: this is not a full MCP registry or schema-validation
//! machinery, just enough to decode each tool's arguments and call
//! `vesper-service`.

use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use vesper_core::constants::DEFAULT_NAMESPACE;
use vesper_core::{VesperError, VesperResult};
use vesper_service::MemoryService;

fn namespace_or_default(ns: Option<String>) -> String {
    ns.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
}

fn bad_args(tool: &str, err: serde_json::Error) -> VesperError {
    VesperError::InvalidInput(format!("{tool}: malformed arguments: {err}"))
}

fn parse_uuid(tool: &str, field: &str, raw: &str) -> VesperResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| VesperError::InvalidInput(format!("{tool}: invalid {field} '{raw}': {e}")))
}

#[derive(Deserialize)]
struct StoreArgs {
    content: String,
    memory_type: String,
    metadata: Option<Value>,
    agent_id: Option<String>,
    task_id: Option<String>,
    namespace: Option<String>,
}

#[derive(Deserialize)]
struct RetrieveArgs {
    query: String,
    max_results: Option<usize>,
    #[serde(default)]
    agent_id: Option<String>,
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    exclude_agent: Option<String>,
    namespace: Option<String>,
}

#[derive(Deserialize)]
struct ListRecentArgs {
    limit: Option<usize>,
    namespace: Option<String>,
}

#[derive(Deserialize)]
struct NamespaceOnlyArgs {
    namespace: Option<String>,
}

#[derive(Deserialize)]
struct DeleteArgs {
    id: String,
    namespace: Option<String>,
}

#[derive(Deserialize)]
struct ShareContextArgs {
    from: String,
    to: String,
    filter: Option<String>,
}

#[derive(Deserialize)]
struct NamespaceStatsArgs {
    namespace: String,
}

#[derive(Deserialize)]
struct LoadSkillArgs {
    skill_id: String,
    namespace: Option<String>,
}

#[derive(Deserialize)]
struct RecordSkillOutcomeArgs {
    skill_id: String,
    success: bool,
    satisfaction: Option<f64>,
    namespace: Option<String>,
}

/// Dispatch one decoded tool call. Returns the `result` payload on success;
/// errors flow back through `VesperError` so `rpc::error_response` can map
/// them onto the shared error taxonomy.
pub async fn dispatch(service: &MemoryService, name: &str, arguments: Value) -> VesperResult<Value> {
    match name {
        "store_memory" => {
            let args: StoreArgs = serde_json::from_value(arguments).map_err(|e| bad_args(name, e))?;
            let namespace = namespace_or_default(args.namespace);
            let result = service
                .store(&namespace, &args.content, &args.memory_type, args.metadata, args.agent_id, args.task_id)
                .await?;
            Ok(json!(result))
        }
        "store_decision" => {
            let args: StoreArgs = serde_json::from_value(arguments).map_err(|e| bad_args(name, e))?;
            let namespace = namespace_or_default(args.namespace);
            let result = service
                .store_decision(&namespace, &args.content, &args.memory_type, args.metadata, args.agent_id, args.task_id)
                .await?;
            Ok(json!(result))
        }
        "retrieve_memory" => {
            let args: RetrieveArgs = serde_json::from_value(arguments).map_err(|e| bad_args(name, e))?;
            let namespace = namespace_or_default(args.namespace);
            let max_results = args.max_results.unwrap_or(10);
            let result = service.retrieve(&namespace, &args.query, max_results).await?;
            Ok(json!(result))
        }
        "list_recent" => {
            let args: ListRecentArgs = serde_json::from_value(arguments).map_err(|e| bad_args(name, e))?;
            let namespace = namespace_or_default(args.namespace);
            let records = service.list_recent(&namespace, args.limit.unwrap_or(10));
            Ok(json!({ "records": records }))
        }
        "get_stats" => {
            let args: NamespaceOnlyArgs = serde_json::from_value(arguments).map_err(|e| bad_args(name, e))?;
            let namespace = namespace_or_default(args.namespace);
            let result = service.stats(&namespace).await?;
            Ok(json!(result))
        }
        "namespace_stats" => {
            let args: NamespaceStatsArgs = serde_json::from_value(arguments).map_err(|e| bad_args(name, e))?;
            let result = service.stats(&args.namespace).await?;
            Ok(json!(result))
        }
        "delete_memory" => {
            let args: DeleteArgs = serde_json::from_value(arguments).map_err(|e| bad_args(name, e))?;
            let namespace = namespace_or_default(args.namespace);
            let result = service.delete(&namespace, &args.id).await?;
            Ok(json!(result))
        }
        "share_context" => {
            let args: ShareContextArgs = serde_json::from_value(arguments).map_err(|e| bad_args(name, e))?;
            let result = service.share_context(&args.from, &args.to, args.filter).await?;
            Ok(json!(result))
        }
        "list_namespaces" => {
            let namespaces = service.list_namespaces().await?;
            Ok(json!(namespaces))
        }
        "vesper_enable" => Ok(json!(service.enable())),
        "vesper_disable" => Ok(json!(service.disable())),
        "vesper_status" => Ok(json!(service.status())),
        "load_skill" => {
            let args: LoadSkillArgs = serde_json::from_value(arguments).map_err(|e| bad_args(name, e))?;
            let namespace = namespace_or_default(args.namespace);
            let skill_id = parse_uuid(name, "skill_id", &args.skill_id)?;
            let skill = service.load_skill(&namespace, skill_id).await?;
            Ok(json!(skill))
        }
        "record_skill_outcome" => {
            let args: RecordSkillOutcomeArgs = serde_json::from_value(arguments).map_err(|e| bad_args(name, e))?;
            let namespace = namespace_or_default(args.namespace);
            let skill_id = parse_uuid(name, "skill_id", &args.skill_id)?;
            let result = service.record_skill_outcome(&namespace, skill_id, args.success, args.satisfaction).await?;
            Ok(json!(result))
        }
        other => Err(VesperError::InvalidInput(format!("unknown tool '{other}'"))),
    }
}
