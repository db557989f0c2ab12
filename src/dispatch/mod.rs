//! Tool-call dispatcher.
//!
//! Turns one `(name, arguments)` call into exactly one backend invocation
//! (or one fan-out, for batch upload) and exactly one [`ToolResult`]. Every
//! failure is rendered in-band as a single text block; nothing propagates
//! past [`Dispatcher::call_tool`].

mod result;

pub use result::{ContentBlock, ToolResult};

use futures::future::join_all;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::client::{BackendClient, QueryRequest, RemoteResponse, ResponseFormat};
use crate::tools::args::{
    parse_args, DeleteByIdsArgs, DeleteEntityArgs, DeleteRelationArgs, EntityExistsArgs,
    InsertTextArgs, InsertTextsArgs, LoginArgs, PayloadArgs, SubgraphArgs, TrackStatusArgs,
    UpdateEntityArgs, UpdateRelationArgs, UploadFileArgs, UploadFilesArgs,
};
use crate::tools::{ToolCatalog, ToolDescriptor, ToolKind};
use crate::types::{Error, Result};
use crate::validation::{
    validate_non_empty, validate_non_empty_list, validate_path_segment, validate_positive,
};

const STRUCTURED: ResponseFormat = ResponseFormat::Structured;

/// Routes tool calls to the backend client.
///
/// Stateless apart from the session held by the shared client.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Arc<BackendClient>,
    catalog: Arc<ToolCatalog>,
}

impl Dispatcher {
    pub fn new(client: Arc<BackendClient>, catalog: Arc<ToolCatalog>) -> Self {
        Self { client, catalog }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    /// Descriptors of every enabled tool, in catalog order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.catalog.descriptors().cloned().collect()
    }

    /// Run one tool call. Always returns at least one content block.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ToolResult {
        match self.try_call(name, arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(tool = name, local = e.is_local(), "Tool '{}' failed: {}", name, e);
                ToolResult::from_error(&e)
            }
        }
    }

    async fn try_call(&self, name: &str, arguments: Value) -> Result<ToolResult> {
        let kind = self.catalog.resolve(name)?;
        let args = match arguments {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(Error::invalid_arguments(format!(
                    "arguments must be an object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let errors = self
            .catalog
            .validate_params(kind, &Value::Object(args.clone()))?;
        if !errors.is_empty() {
            return Err(Error::invalid_arguments(format!(
                "Invalid arguments for '{}': {}",
                name,
                errors.join("; ")
            )));
        }

        tracing::debug!(tool = name, read_only = kind.is_read_only(), "Dispatching tool call");
        self.invoke(kind, args).await
    }

    async fn invoke(&self, kind: ToolKind, args: Map<String, Value>) -> Result<ToolResult> {
        let client = &self.client;
        let result = match kind {
            // -------- system & auth --------
            ToolKind::Health => wrap(client.health(STRUCTURED).await?),
            ToolKind::AuthStatus => wrap(client.auth_status(STRUCTURED).await?),
            ToolKind::AuthLogin => {
                let a: LoginArgs = parse_args(&args)?;
                validate_non_empty(&a.username, "username")?;
                validate_non_empty(&a.password, "password")?;
                wrap(client.login(&a.username, &a.password, &a.scope, STRUCTURED).await?)
            }

            // -------- documents --------
            ToolKind::DocumentsScan => wrap(client.documents_scan(STRUCTURED).await?),
            ToolKind::DocumentsUploadFile => {
                let a: UploadFileArgs = parse_args(&args)?;
                validate_non_empty(&a.file_path, "file_path")?;
                let response = client.upload_file(&a.file_path, STRUCTURED).await?;
                wrap_with("file", json!(a.file_path), response)
            }
            ToolKind::DocumentsUploadFiles => {
                let a: UploadFilesArgs = parse_args(&args)?;
                validate_non_empty_list(&a.file_paths, "file_paths")?;
                let results = self.upload_many(&a.file_paths).await;
                ToolResult::json(json!({ "results": results }))
            }
            ToolKind::DocumentsInsertText => {
                let a: InsertTextArgs = parse_args(&args)?;
                validate_non_empty(&a.text, "text")?;
                wrap(
                    client
                        .insert_text(&a.text, a.file_source.as_deref(), STRUCTURED)
                        .await?,
                )
            }
            ToolKind::DocumentsInsertTexts => {
                let a: InsertTextsArgs = parse_args(&args)?;
                validate_non_empty_list(&a.texts, "texts")?;
                wrap(
                    client
                        .insert_texts(&a.texts, a.file_sources.as_deref(), STRUCTURED)
                        .await?,
                )
            }
            ToolKind::DocumentsClearAll => wrap(client.clear_documents(STRUCTURED).await?),
            ToolKind::DocumentsListStatuses => {
                wrap(client.list_document_statuses(STRUCTURED).await?)
            }
            ToolKind::DocumentsPipelineStatus => wrap(client.pipeline_status(STRUCTURED).await?),
            ToolKind::DocumentsDeleteByIds => {
                let a: DeleteByIdsArgs = parse_args(&args)?;
                validate_non_empty_list(&a.doc_ids, "doc_ids")?;
                wrap(
                    client
                        .delete_documents(&a.doc_ids, a.delete_file, STRUCTURED)
                        .await?,
                )
            }
            ToolKind::DocumentsClearCache => wrap(client.clear_cache(STRUCTURED).await?),
            ToolKind::DocumentsDeleteEntity => {
                let a: DeleteEntityArgs = parse_args(&args)?;
                validate_non_empty(&a.entity_name, "entity_name")?;
                wrap(client.delete_entity(&a.entity_name, STRUCTURED).await?)
            }
            ToolKind::DocumentsDeleteRelation => {
                let a: DeleteRelationArgs = parse_args(&args)?;
                validate_non_empty(&a.source_entity, "source_entity")?;
                validate_non_empty(&a.target_entity, "target_entity")?;
                wrap(
                    client
                        .delete_relation(&a.source_entity, &a.target_entity, STRUCTURED)
                        .await?,
                )
            }
            ToolKind::DocumentsTrackStatus => {
                let a: TrackStatusArgs = parse_args(&args)?;
                validate_path_segment(&a.track_id, "track_id")?;
                let response = client.track_status(&a.track_id, STRUCTURED).await?;
                wrap_with("track_id", json!(a.track_id), response)
            }
            ToolKind::DocumentsPaginated => {
                let response = client.paginated_documents(&args, STRUCTURED).await?;
                wrap_with("request", Value::Object(args), response)
            }
            ToolKind::DocumentsStatusCounts => wrap(client.status_counts(STRUCTURED).await?),

            // -------- query --------
            ToolKind::Query => {
                let request = query_request(&args)?;
                let response = client.query(&request, STRUCTURED).await?;
                ToolResult::text(answer_text(response.into_value()))
            }
            ToolKind::QueryStream => {
                let request = query_request(&args)?;
                let stream = client.query_stream(&request).await?.to_text();
                ToolResult::json(json!({ "request": request, "stream": stream }))
            }

            // -------- graph --------
            ToolKind::GraphLabels => wrap(client.graph_labels(STRUCTURED).await?),
            ToolKind::GraphsGet => {
                let a: SubgraphArgs = parse_args(&args)?;
                validate_non_empty(&a.label, "label")?;
                validate_positive(a.max_depth, "max_depth")?;
                validate_positive(a.max_nodes, "max_nodes")?;
                let response = client
                    .subgraph(&a.label, a.max_depth, a.max_nodes, STRUCTURED)
                    .await?;
                wrap_with("label", json!(a.label), response)
            }
            ToolKind::GraphEntityExists => {
                let a: EntityExistsArgs = parse_args(&args)?;
                validate_non_empty(&a.name, "name")?;
                let response = client.entity_exists(&a.name, STRUCTURED).await?;
                wrap_with("name", json!(a.name), response)
            }
            ToolKind::GraphUpdateEntity => {
                let a: UpdateEntityArgs = parse_args(&args)?;
                validate_non_empty(&a.entity_name, "entity_name")?;
                wrap(
                    client
                        .update_entity(&a.entity_name, &a.updated_data, a.allow_rename, STRUCTURED)
                        .await?,
                )
            }
            ToolKind::GraphUpdateRelation => {
                let a: UpdateRelationArgs = parse_args(&args)?;
                validate_non_empty(&a.source_id, "source_id")?;
                validate_non_empty(&a.target_id, "target_id")?;
                wrap(
                    client
                        .update_relation(&a.source_id, &a.target_id, &a.updated_data, STRUCTURED)
                        .await?,
                )
            }

            // -------- ollama-compatible --------
            ToolKind::OllamaVersion => wrap(client.ollama_version(STRUCTURED).await?),
            ToolKind::OllamaTags => wrap(client.ollama_tags(STRUCTURED).await?),
            ToolKind::OllamaPs => wrap(client.ollama_ps(STRUCTURED).await?),
            ToolKind::OllamaGenerate => {
                let a: PayloadArgs = parse_args(&args)?;
                let response = client.ollama_generate(&a.payload, STRUCTURED).await?;
                wrap_with("request", Value::Object(a.payload), response)
            }
            ToolKind::OllamaChat => {
                let a: PayloadArgs = parse_args(&args)?;
                let response = client.ollama_chat(&a.payload, STRUCTURED).await?;
                wrap_with("request", Value::Object(a.payload), response)
            }
        };
        Ok(result)
    }

    /// Upload every path concurrently. Results are index-aligned with
    /// `paths`; one failure never cancels or fails its siblings.
    async fn upload_many(&self, paths: &[String]) -> Vec<Value> {
        let uploads = paths.iter().map(|path| async move {
            let result = match self.client.upload_file(path, STRUCTURED).await {
                Ok(response) => response.into_value(),
                Err(e) => {
                    tracing::warn!("Upload of {} failed: {}", path, e);
                    json!({ "error": e.to_string() })
                }
            };
            json!({ "file": path, "result": result })
        });
        join_all(uploads).await
    }
}

fn wrap(response: RemoteResponse) -> ToolResult {
    ToolResult::json(json!({ "result": response.into_value() }))
}

fn wrap_with(key: &str, echo: Value, response: RemoteResponse) -> ToolResult {
    let mut body = Map::new();
    body.insert(key.to_string(), echo);
    body.insert("result".to_string(), response.into_value());
    ToolResult::json(Value::Object(body))
}

fn query_request(args: &Map<String, Value>) -> Result<QueryRequest> {
    let request: QueryRequest = serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| Error::invalid_arguments(format!("Invalid query arguments: {}", e)))?;
    if request.query.trim().is_empty() {
        return Err(Error::invalid_arguments("'query' must be a non-empty string"));
    }
    Ok(request)
}

/// The `response` field of a query result, or the whole result as text.
fn answer_text(value: Value) -> String {
    if let Some(response) = value.get("response") {
        return match response {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
    }
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
