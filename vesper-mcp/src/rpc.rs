//! Line-delimited JSON-RPC envelope: `{id, method: "tools/call",
//! params: {name, arguments}}` in, `{id, result}` or `{id, error}` out.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<ToolCallParams>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Serialize)]
pub struct RpcErrorBody {
    pub code: i32,
    pub message: String,
}

impl RpcResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self { id, result: Some(result), error: None }
    }

    pub fn err(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self { id, result: None, error: Some(RpcErrorBody { code, message: message.into() }) }
    }
}

/// Maps the error taxonomy onto a JSON-RPC-ish numeric code.
/// Not a standard JSON-RPC reserved range by design — `code` here is a
/// stable enum tag for the host agent, not a protocol-level dispatch code.
pub fn error_code(kind: vesper_core::ErrorKind) -> i32 {
    use vesper_core::ErrorKind::*;
    match kind {
        InvalidInput => 1,
        NotFound => 2,
        Conflict => 3,
        Unavailable => 4,
        Timeout => 5,
        Cancelled => 6,
        Internal => 7,
    }
}

/// Turn a `VesperError` into the `{error:{code, message}}` body: a short
/// human message, no stack trace.
pub fn error_response(id: Value, err: vesper_core::VesperError) -> RpcResponse {
    RpcResponse::err(id, error_code(err.kind()), err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn a_tools_call_request_decodes_its_params() {
        let raw = r#"{"id":1,"method":"tools/call","params":{"name":"store_memory","arguments":{"content":"hi"}}}"#;
        let request: RpcRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.method, "tools/call");
        let params = request.params.unwrap();
        assert_eq!(params.name, "store_memory");
        assert_eq!(params.arguments, json!({"content": "hi"}));
    }

    #[test]
    fn ok_response_omits_the_error_field_when_serialized() {
        let response = RpcResponse::ok(json!(7), json!({"stored": true}));
        let encoded = serde_json::to_value(&response).unwrap();
        assert!(encoded.get("error").is_none());
        assert_eq!(encoded["result"], json!({"stored": true}));
    }

    #[test]
    fn invalid_input_maps_to_code_one() {
        let err = vesper_core::VesperError::InvalidInput("bad".to_string());
        assert_eq!(error_code(err.kind()), 1);
    }
}
