//! JSON-RPC method router for `initialize`, `ping`, `tools/list`, `tools/call`.

use serde_json::{json, Value};

use crate::dispatch::Dispatcher;

/// Protocol revision reported when the client does not ask for one.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
/// Server name reported in `initialize`.
pub const SERVER_NAME: &str = "lightrag_mcp";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

/// Route one decoded message. Returns `None` for notifications.
pub async fn route_message(dispatcher: &Dispatcher, message: Value) -> Option<Value> {
    if !message.is_object() {
        // Batches are not supported; neither are bare scalars.
        tracing::warn!("Rejecting non-object message");
        return Some(failure(Value::Null, INVALID_REQUEST, "Invalid Request: expected an object"));
    }
    let id = message.get("id").cloned();
    let Some(method) = message.get("method").and_then(Value::as_str) else {
        // Responses from the host carry no method; nothing to answer.
        if message.get("result").is_some() || message.get("error").is_some() {
            return None;
        }
        return id.map(|id| failure(id, INVALID_REQUEST, "Missing method"));
    };
    let Some(id) = id else {
        tracing::debug!("Notification: {}", method);
        return None;
    };
    let params = message.get("params").cloned().unwrap_or(Value::Null);

    let reply = match method {
        "initialize" => success(id, initialize_result(&params)),
        "ping" => success(id, json!({})),
        "tools/list" => success(id, json!({ "tools": dispatcher.list_tools() })),
        "tools/call" => {
            let Some(name) = params.get("name").and_then(Value::as_str) else {
                return Some(failure(id, INVALID_PARAMS, "Missing required field: name"));
            };
            let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
            let result = dispatcher.call_tool(name, arguments).await;
            success(
                id,
                json!({ "content": result.to_mcp_content(), "isError": false }),
            )
        }
        other => failure(id, METHOD_NOT_FOUND, &format!("Method not found: {}", other)),
    };
    Some(reply)
}

fn initialize_result(params: &Value) -> Value {
    let version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION);
    json!({
        "protocolVersion": version,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

// =============================================================================
// Shared helpers: JSON-RPC envelopes
// =============================================================================

pub fn success(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub fn failure(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BackendClient;
    use crate::tools::ToolCatalog;
    use crate::types::BackendConfig;
    use std::sync::Arc;

    fn dispatcher_with(enabled: &[&str]) -> Dispatcher {
        let client = Arc::new(BackendClient::new(&BackendConfig::default()).unwrap());
        let enabled: Vec<String> = enabled.iter().map(|s| s.to_string()).collect();
        let catalog = Arc::new(ToolCatalog::with_enabled(Some(&enabled), false).unwrap());
        Dispatcher::new(client, catalog)
    }

    #[tokio::test]
    async fn test_initialize_echoes_protocol_version() {
        let dispatcher = dispatcher_with(&[]);
        let reply = route_message(
            &dispatcher,
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2025-06-18"}}),
        )
        .await
        .unwrap();
        assert_eq!(reply["result"]["protocolVersion"], "2025-06-18");
        assert_eq!(reply["result"]["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(reply["result"]["capabilities"], json!({"tools": {}}));
    }

    #[tokio::test]
    async fn test_notification_gets_no_reply() {
        let dispatcher = dispatcher_with(&[]);
        let reply = route_message(
            &dispatcher,
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        )
        .await;
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_tools_list_uses_filter() {
        let dispatcher = dispatcher_with(&["query", "health"]);
        let reply = route_message(
            &dispatcher,
            json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"}),
        )
        .await
        .unwrap();
        let tools = reply["result"]["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["health", "query"]);
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let dispatcher = dispatcher_with(&[]);
        let reply = route_message(
            &dispatcher,
            json!({"jsonrpc": "2.0", "id": 7, "method": "resources/list"}),
        )
        .await
        .unwrap();
        assert_eq!(reply["id"], 7);
        assert_eq!(reply["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_batch_array_is_invalid_request() {
        let dispatcher = dispatcher_with(&[]);
        let reply = route_message(
            &dispatcher,
            json!([{"jsonrpc": "2.0", "id": 1, "method": "ping"}]),
        )
        .await
        .unwrap();
        assert_eq!(reply["id"], Value::Null);
        assert_eq!(reply["error"]["code"], INVALID_REQUEST);

        let reply = route_message(&dispatcher, json!(42)).await.unwrap();
        assert_eq!(reply["error"]["code"], INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_host_response_gets_no_reply() {
        let dispatcher = dispatcher_with(&[]);
        let reply = route_message(
            &dispatcher,
            json!({"jsonrpc": "2.0", "id": 9, "result": {}}),
        )
        .await;
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_call_without_name_is_invalid_params() {
        let dispatcher = dispatcher_with(&[]);
        let reply = route_message(
            &dispatcher,
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {}}),
        )
        .await
        .unwrap();
        assert_eq!(reply["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_a_protocol_fault() {
        let dispatcher = dispatcher_with(&["health"]);
        let reply = route_message(
            &dispatcher,
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "query", "arguments": {"query": "x"}}}),
        )
        .await
        .unwrap();
        assert!(reply.get("error").is_none());
        assert_eq!(
            reply["result"]["content"],
            json!([{"type": "text", "text": "Error: Unknown tool: query"}])
        );
        assert_eq!(reply["result"]["isError"], false);
    }
}
