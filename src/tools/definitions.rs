//! Descriptions and input schemas for every [`ToolKind`].
//!
//! Each description names the backend route and ends with a literal example
//! payload, which LLM-driven callers copy far more reliably than a type list.

use serde_json::{json, Value};

use super::kind::ToolKind;
use crate::client::QueryRequest;

fn describe(summary: &str, example: &str) -> String {
    format!("{}\nExample input: {}", summary, example)
}

fn empty_object() -> Value {
    json!({"type": "object", "properties": {}})
}

fn query_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(QueryRequest))
        .unwrap_or_else(|_| json!({"type": "object", "required": ["query"]}))
}

impl ToolKind {
    pub fn description(self) -> String {
        match self {
            ToolKind::Health => describe("Get current system status (GET /health).", "{}"),
            ToolKind::AuthStatus => describe(
                "Get authentication status, including a guest token when auth is not configured (GET /auth-status).",
                "{}",
            ),
            ToolKind::AuthLogin => describe(
                "Log in with the OAuth2 password flow (POST /login). The returned bearer token is reused for every later call.",
                r#"{"username":"admin","password":"secret"}"#,
            ),
            ToolKind::DocumentsScan => describe(
                "Scan the input directory for new documents (POST /documents/scan).",
                "{}",
            ),
            ToolKind::DocumentsUploadFile => describe(
                "Upload one local file to the input directory and index it (POST /documents/upload).",
                r#"{"file_path":"/path/to/file.pdf"}"#,
            ),
            ToolKind::DocumentsUploadFiles => describe(
                "Upload several local files concurrently, one POST /documents/upload per file. Results keep input order; a failed file does not stop the others.",
                r#"{"file_paths":["/a.pdf","/b.md"]}"#,
            ),
            ToolKind::DocumentsInsertText => describe(
                "Insert a single text (POST /documents/text).",
                r#"{"text":"hello","file_source":"notes.txt"}"#,
            ),
            ToolKind::DocumentsInsertTexts => describe(
                "Insert multiple texts (POST /documents/texts).",
                r#"{"texts":["a","b"],"file_sources":["a.txt","b.txt"]}"#,
            ),
            ToolKind::DocumentsClearAll => describe(
                "Clear ALL documents and files (DELETE /documents). Irreversible.",
                "{}",
            ),
            ToolKind::DocumentsListStatuses => describe(
                "List documents grouped by processing status (GET /documents).",
                "{}",
            ),
            ToolKind::DocumentsPipelineStatus => describe(
                "Get pipeline status and progress (GET /documents/pipeline_status).",
                "{}",
            ),
            ToolKind::DocumentsDeleteByIds => describe(
                "Delete specific documents (DELETE /documents/delete_document).",
                r#"{"doc_ids":["doc_123"],"delete_file":false}"#,
            ),
            ToolKind::DocumentsClearCache => {
                describe("Clear the LLM response cache (POST /documents/clear_cache).", "{}")
            }
            ToolKind::DocumentsDeleteEntity => describe(
                "Delete an entity from the knowledge graph (DELETE /documents/delete_entity).",
                r#"{"entity_name":"Apple Inc."}"#,
            ),
            ToolKind::DocumentsDeleteRelation => describe(
                "Delete a relation from the knowledge graph (DELETE /documents/delete_relation).",
                r#"{"source_entity":"A","target_entity":"B"}"#,
            ),
            ToolKind::DocumentsTrackStatus => describe(
                "Track processing status by track id (GET /documents/track_status/{track_id}).",
                r#"{"track_id":"upload_20250729_170612_abc123"}"#,
            ),
            ToolKind::DocumentsPaginated => describe(
                "Page through documents (POST /documents/paginated).",
                r#"{"page":1,"page_size":50,"sort_field":"updated_at","sort_direction":"desc"}"#,
            ),
            ToolKind::DocumentsStatusCounts => describe(
                "Count documents by status (GET /documents/status_counts).",
                "{}",
            ),
            ToolKind::Query => describe(
                "RAG query (POST /query). Returns the answer text.",
                r#"{"query":"Summarize recent docs","mode":"hybrid","top_k":5,"only_need_context":false}"#,
            ),
            ToolKind::QueryStream => describe(
                "Streamed RAG query (POST /query/stream). The stream is drained and returned as {request, stream}.",
                r#"{"query":"Show citations","mode":"hybrid"}"#,
            ),
            ToolKind::GraphLabels => describe("List graph labels (GET /graph/label/list).", "{}"),
            ToolKind::GraphsGet => describe(
                "Retrieve the subgraph around a label (GET /graphs).",
                r#"{"label":"OpenAI","max_depth":3,"max_nodes":100}"#,
            ),
            ToolKind::GraphEntityExists => describe(
                "Check whether an entity exists (GET /graph/entity/exists).",
                r#"{"name":"Apple Inc."}"#,
            ),
            ToolKind::GraphUpdateEntity => describe(
                "Update entity properties (POST /graph/entity/edit).",
                r#"{"entity_name":"Apple","updated_data":{"aliases":["Apple Inc"]},"allow_rename":false}"#,
            ),
            ToolKind::GraphUpdateRelation => describe(
                "Update relation properties (POST /graph/relation/edit).",
                r#"{"source_id":"e1","target_id":"e2","updated_data":{"weight":0.9}}"#,
            ),
            ToolKind::OllamaVersion => {
                describe("Get Ollama-compatible version info (GET /api/version).", "{}")
            }
            ToolKind::OllamaTags => describe("List available models (GET /api/tags).", "{}"),
            ToolKind::OllamaPs => describe("List running models (GET /api/ps).", "{}"),
            ToolKind::OllamaGenerate => describe(
                "Direct completion against the underlying LLM (POST /api/generate).",
                r#"{"payload":{"model":"qwen","prompt":"Hello"}}"#,
            ),
            ToolKind::OllamaChat => describe(
                "Chat completion (POST /api/chat).",
                r#"{"payload":{"model":"qwen","messages":[{"role":"user","content":"hi"}]}}"#,
            ),
        }
    }

    pub fn input_schema(self) -> Value {
        match self {
            ToolKind::Health
            | ToolKind::AuthStatus
            | ToolKind::DocumentsScan
            | ToolKind::DocumentsClearAll
            | ToolKind::DocumentsListStatuses
            | ToolKind::DocumentsPipelineStatus
            | ToolKind::DocumentsClearCache
            | ToolKind::DocumentsStatusCounts
            | ToolKind::GraphLabels
            | ToolKind::OllamaVersion
            | ToolKind::OllamaTags
            | ToolKind::OllamaPs => empty_object(),

            ToolKind::AuthLogin => json!({
                "type": "object",
                "properties": {
                    "username": {"type": "string"},
                    "password": {"type": "string"},
                    "scope": {"type": "string", "default": ""},
                },
                "required": ["username", "password"],
            }),
            ToolKind::DocumentsUploadFile => json!({
                "type": "object",
                "properties": {"file_path": {"type": "string"}},
                "required": ["file_path"],
            }),
            ToolKind::DocumentsUploadFiles => json!({
                "type": "object",
                "properties": {
                    "file_paths": {"type": "array", "items": {"type": "string"}},
                },
                "required": ["file_paths"],
            }),
            ToolKind::DocumentsInsertText => json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string"},
                    "file_source": {"type": "string"},
                },
                "required": ["text"],
            }),
            ToolKind::DocumentsInsertTexts => json!({
                "type": "object",
                "properties": {
                    "texts": {"type": "array", "items": {"type": "string"}},
                    "file_sources": {"type": "array", "items": {"type": "string"}},
                },
                "required": ["texts"],
            }),
            ToolKind::DocumentsDeleteByIds => json!({
                "type": "object",
                "properties": {
                    "doc_ids": {"type": "array", "items": {"type": "string"}},
                    "delete_file": {"type": "boolean", "default": false},
                },
                "required": ["doc_ids"],
            }),
            ToolKind::DocumentsDeleteEntity => json!({
                "type": "object",
                "properties": {"entity_name": {"type": "string"}},
                "required": ["entity_name"],
            }),
            ToolKind::DocumentsDeleteRelation => json!({
                "type": "object",
                "properties": {
                    "source_entity": {"type": "string"},
                    "target_entity": {"type": "string"},
                },
                "required": ["source_entity", "target_entity"],
            }),
            ToolKind::DocumentsTrackStatus => json!({
                "type": "object",
                "properties": {"track_id": {"type": "string"}},
                "required": ["track_id"],
            }),
            ToolKind::DocumentsPaginated => json!({
                "type": "object",
                "properties": {
                    "status_filter": {
                        "type": "string",
                        "enum": ["pending", "processing", "processed", "failed"],
                    },
                    "page": {"type": "integer", "minimum": 1, "default": 1},
                    "page_size": {"type": "integer", "minimum": 10, "maximum": 200, "default": 50},
                    "sort_field": {
                        "type": "string",
                        "enum": ["created_at", "updated_at", "id", "file_path"],
                        "default": "updated_at",
                    },
                    "sort_direction": {
                        "type": "string",
                        "enum": ["asc", "desc"],
                        "default": "desc",
                    },
                },
            }),
            ToolKind::Query | ToolKind::QueryStream => query_schema(),
            ToolKind::GraphsGet => json!({
                "type": "object",
                "properties": {
                    "label": {"type": "string"},
                    "max_depth": {"type": "integer", "minimum": 1, "default": 3},
                    "max_nodes": {"type": "integer", "minimum": 1, "default": 1000},
                },
                "required": ["label"],
            }),
            ToolKind::GraphEntityExists => json!({
                "type": "object",
                "properties": {"name": {"type": "string"}},
                "required": ["name"],
            }),
            ToolKind::GraphUpdateEntity => json!({
                "type": "object",
                "properties": {
                    "entity_name": {"type": "string"},
                    "updated_data": {"type": "object", "additionalProperties": true},
                    "allow_rename": {"type": "boolean", "default": false},
                },
                "required": ["entity_name", "updated_data"],
            }),
            ToolKind::GraphUpdateRelation => json!({
                "type": "object",
                "properties": {
                    "source_id": {"type": "string"},
                    "target_id": {"type": "string"},
                    "updated_data": {"type": "object", "additionalProperties": true},
                },
                "required": ["source_id", "target_id", "updated_data"],
            }),
            ToolKind::OllamaGenerate | ToolKind::OllamaChat => json!({
                "type": "object",
                "properties": {
                    "payload": {"type": "object", "additionalProperties": true},
                },
                "required": ["payload"],
            }),
        }
    }
}
