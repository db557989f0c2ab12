//! Stdio transport integration tests: newline-delimited JSON-RPC in, replies
//! out, with tool calls reaching a mock backend.

mod common;

use common::{dispatcher_for, start_mock_backend};
use lightrag_mcp::mcp::McpServer;
use lightrag_mcp::types::ServerConfig;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Feed `input` to a fresh server and collect every reply line until it
/// closes its output.
async fn run_session(base_url: &str, input: &str) -> Vec<Value> {
    let server = McpServer::new(dispatcher_for(base_url, None), ServerConfig::default());
    let (mut client_tx, server_rx) = tokio::io::duplex(64 * 1024);
    let (server_tx, client_rx) = tokio::io::duplex(64 * 1024);

    let handle = tokio::spawn(async move { server.serve(server_rx, server_tx).await });

    client_tx.write_all(input.as_bytes()).await.unwrap();
    drop(client_tx);

    let mut replies = Vec::new();
    let mut lines = BufReader::new(client_rx).lines();
    while let Some(line) = lines.next_line().await.unwrap() {
        replies.push(serde_json::from_str(&line).unwrap());
    }
    handle.await.unwrap().unwrap();
    replies
}

#[tokio::test]
async fn test_session_round_trip() {
    let (url, _mock) = start_mock_backend().await;
    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2024-11-05"}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "health", "arguments": {}}}),
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "query", "arguments": {"query": "ping"}}}),
    ]
    .iter()
    .map(|m| format!("{}\n", m))
    .collect::<String>();

    let replies = run_session(&url, &input).await;
    assert_eq!(replies.len(), 4);

    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[0]["result"]["protocolVersion"], "2024-11-05");

    assert_eq!(replies[1]["id"], 2);
    let tools = replies[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), lightrag_mcp::ToolKind::ALL.len());
    assert_eq!(tools[0]["name"], "health");

    assert_eq!(replies[2]["id"], 3);
    let text = replies[2]["result"]["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload, json!({"result": {"status": "healthy"}}));

    assert_eq!(replies[3]["id"], 4);
    assert_eq!(
        replies[3]["result"]["content"],
        json!([{"type": "text", "text": "pong"}])
    );
    assert_eq!(replies[3]["result"]["isError"], false);
}

#[tokio::test]
async fn test_garbage_line_gets_parse_error_and_session_continues() {
    let (url, _mock) = start_mock_backend().await;
    let input = format!(
        "{{not json\n\n{}\n",
        json!({"jsonrpc": "2.0", "id": "p", "method": "ping"})
    );

    let replies = run_session(&url, &input).await;
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["id"], Value::Null);
    assert_eq!(replies[0]["error"]["code"], -32700);
    assert_eq!(replies[1], json!({"jsonrpc": "2.0", "id": "p", "result": {}}));
}

#[tokio::test]
async fn test_shutdown_stops_idle_server() {
    let server = McpServer::new(
        dispatcher_for("http://127.0.0.1:9", None),
        ServerConfig::default(),
    );
    let cancel = server.cancel_token();
    let (_client_tx, server_rx) = tokio::io::duplex(1024);
    let (server_tx, _client_rx) = tokio::io::duplex(1024);

    let handle = tokio::spawn(async move { server.serve(server_rx, server_tx).await });
    cancel.cancel();
    handle.await.unwrap().unwrap();
}
