//! HTTP binding to one LightRAG backend.
//!
//! One method per remote endpoint. Every request carries
//! `Accept: application/json` (except login), the API key as both
//! `X-API-Key` header and `api_key_header_value` query parameter, and the
//! session bearer token once a login has produced one.
//!
//! Failures come back as [`Error::Transport`], [`Error::Http`] or
//! [`Error::Decode`]. Undecodable 2xx bodies are not failures; see
//! [`RemoteResponse::decode`].

mod models;
mod response;
mod session;

pub use models::{QueryMode, QueryRequest};
pub use response::{LineJoiner, RemoteResponse, ResponseFormat};
pub use session::{extract_token, Session, API_KEY_HEADER, API_KEY_QUERY_PARAM, TOKEN_KEYS};

use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{IntoUrl, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::types::{BackendConfig, Error, Result};

/// Async client for the LightRAG HTTP API.
#[derive(Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    session: Session,
}

impl BackendClient {
    /// Build a client whose every request is bounded by `config.timeout`.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))?;

        let session = Session::new(&config.base_url, config.api_key.clone());
        tracing::info!("Using LightRAG at: {}", session.base_url());
        if session.has_api_key() {
            tracing::info!("API key is set");
        }

        Ok(Self { http, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.session.base_url(), path)
    }

    /// `path` followed by `segment` as one percent-encoded path segment.
    fn url_with_segment(&self, path: &str, segment: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| Error::config(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::config("Base URL cannot carry a path"))?
            .push(segment);
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_to(method, self.url(path))
    }

    fn request_to<U: IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        self.session.authorize(builder)
    }

    async fn send(&self, builder: RequestBuilder, method: &Method, path: &str) -> Result<Response> {
        tracing::debug!("{} {}", method, path);
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, path, e);
            Error::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} {} returned {}", method, path, status);
            return Err(Error::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }
        Ok(response)
    }

    async fn fetch(
        &self,
        builder: RequestBuilder,
        method: Method,
        path: &str,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let response = self.send(builder, &method, path).await?;
        let body = response.text().await?;
        Ok(RemoteResponse::decode(&body, format))
    }

    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let builder = self.request(Method::GET, path).query(query);
        self.fetch(builder, Method::GET, path, format).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let builder = self.request(Method::POST, path).json(body);
        self.fetch(builder, Method::POST, path, format).await
    }

    async fn delete(
        &self,
        path: &str,
        body: Option<&Value>,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let mut builder = self.request(Method::DELETE, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.fetch(builder, Method::DELETE, path, format).await
    }

    // =========================================================================
    // Auth & health
    // =========================================================================

    pub async fn health(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.get("/health", &[], format).await
    }

    pub async fn auth_status(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.get("/auth-status", &[], format).await
    }

    /// OAuth2 password flow. A token in the response replaces the session's
    /// bearer token; a response without one leaves the session untouched.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        scope: &str,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let path = "/login";
        // No Accept header here: some identity providers reject it.
        let builder = self
            .session
            .authorize(self.http.post(self.url(path)))
            .form(&[("username", username), ("password", password), ("scope", scope)]);

        let response = self.send(builder, &Method::POST, path).await?;
        let body = response.text().await?;
        let decoded = RemoteResponse::decode(&body, ResponseFormat::Structured);

        if let RemoteResponse::Object(payload) = &decoded {
            if self.session.absorb_login(payload) {
                tracing::info!("Stored bearer token from login");
            } else {
                tracing::info!("Login response carried no token; session unchanged");
            }
        }

        Ok(match format {
            ResponseFormat::Structured => decoded,
            ResponseFormat::Text => RemoteResponse::RawText(decoded.to_text()),
        })
    }

    // =========================================================================
    // Documents
    // =========================================================================

    pub async fn documents_scan(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.post_json("/documents/scan", &json!({}), format).await
    }

    /// Upload one local file as multipart field `file`.
    ///
    /// A missing path short-circuits with `{"error": "File not found: <path>"}`
    /// before any request is made.
    pub async fn upload_file(&self, file_path: &str, format: ResponseFormat) -> Result<RemoteResponse> {
        let path = Path::new(file_path);
        let is_file = tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            tracing::warn!("Upload skipped, file not found: {}", file_path);
            let err = json!({ "error": format!("File not found: {}", file_path) });
            return Ok(RemoteResponse::local(err, format));
        }

        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.to_string());
        let content_type = mime_guess::from_path(path).first_or_octet_stream();

        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(content_type.as_ref())?;
        let form = Form::new().part("file", part);

        let path = "/documents/upload";
        let builder = self.request(Method::POST, path).multipart(form);
        self.fetch(builder, Method::POST, path, format).await
    }

    pub async fn insert_text(
        &self,
        text: &str,
        file_source: Option<&str>,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let mut payload = Map::new();
        payload.insert("text".to_string(), json!(text));
        if let Some(source) = file_source {
            payload.insert("file_source".to_string(), json!(source));
        }
        self.post_json("/documents/text", &payload, format).await
    }

    pub async fn insert_texts(
        &self,
        texts: &[String],
        file_sources: Option<&[String]>,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let mut payload = Map::new();
        payload.insert("texts".to_string(), json!(texts));
        if let Some(sources) = file_sources {
            payload.insert("file_sources".to_string(), json!(sources));
        }
        self.post_json("/documents/texts", &payload, format).await
    }

    pub async fn clear_documents(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.delete("/documents", None, format).await
    }

    pub async fn list_document_statuses(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.get("/documents", &[], format).await
    }

    pub async fn pipeline_status(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.get("/documents/pipeline_status", &[], format).await
    }

    pub async fn delete_documents(
        &self,
        doc_ids: &[String],
        delete_file: bool,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let payload = json!({ "doc_ids": doc_ids, "delete_file": delete_file });
        self.delete("/documents/delete_document", Some(&payload), format)
            .await
    }

    pub async fn clear_cache(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.post_json("/documents/clear_cache", &json!({}), format).await
    }

    pub async fn delete_entity(&self, entity_name: &str, format: ResponseFormat) -> Result<RemoteResponse> {
        let payload = json!({ "entity_name": entity_name });
        self.delete("/documents/delete_entity", Some(&payload), format)
            .await
    }

    pub async fn delete_relation(
        &self,
        source_entity: &str,
        target_entity: &str,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let payload = json!({ "source_entity": source_entity, "target_entity": target_entity });
        self.delete("/documents/delete_relation", Some(&payload), format)
            .await
    }

    /// `track_id` is always sent as a single path segment; `/`, `?` and `#`
    /// in it are percent-encoded.
    pub async fn track_status(&self, track_id: &str, format: ResponseFormat) -> Result<RemoteResponse> {
        let url = self.url_with_segment("/documents/track_status", track_id)?;
        let path = url.path().to_string();
        let builder = self.request_to(Method::GET, url);
        self.fetch(builder, Method::GET, &path, format).await
    }

    /// Forwards the request object verbatim.
    pub async fn paginated_documents(
        &self,
        request: &Map<String, Value>,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        self.post_json("/documents/paginated", request, format).await
    }

    pub async fn status_counts(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.get("/documents/status_counts", &[], format).await
    }

    // =========================================================================
    // Query
    // =========================================================================

    pub async fn query(&self, request: &QueryRequest, format: ResponseFormat) -> Result<RemoteResponse> {
        self.post_json("/query", request, format).await
    }

    /// Drain `/query/stream` and join its non-empty lines with `\n`.
    ///
    /// Returns only once the backend closes the stream; the client timeout
    /// bounds the whole exchange.
    pub async fn query_stream(&self, request: &QueryRequest) -> Result<RemoteResponse> {
        let path = "/query/stream";
        let builder = self.request(Method::POST, path).json(request);
        let response = self.send(builder, &Method::POST, path).await?;

        let mut stream = response.bytes_stream();
        let mut joiner = LineJoiner::new();
        while let Some(chunk) = stream.next().await {
            let chunk: Bytes = chunk.map_err(|e| {
                tracing::warn!("POST {} stream interrupted: {}", path, e);
                Error::from(e)
            })?;
            joiner.push(&chunk);
        }
        Ok(RemoteResponse::StreamConcat(joiner.finish()))
    }

    // =========================================================================
    // Graph
    // =========================================================================

    pub async fn graph_labels(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.get("/graph/label/list", &[], format).await
    }

    pub async fn subgraph(
        &self,
        label: &str,
        max_depth: u32,
        max_nodes: u32,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let query = [
            ("label", label.to_string()),
            ("max_depth", max_depth.to_string()),
            ("max_nodes", max_nodes.to_string()),
        ];
        self.get("/graphs", &query, format).await
    }

    pub async fn entity_exists(&self, name: &str, format: ResponseFormat) -> Result<RemoteResponse> {
        self.get("/graph/entity/exists", &[("name", name.to_string())], format)
            .await
    }

    pub async fn update_entity(
        &self,
        entity_name: &str,
        updated_data: &Map<String, Value>,
        allow_rename: bool,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let payload = json!({
            "entity_name": entity_name,
            "updated_data": updated_data,
            "allow_rename": allow_rename,
        });
        self.post_json("/graph/entity/edit", &payload, format).await
    }

    pub async fn update_relation(
        &self,
        source_id: &str,
        target_id: &str,
        updated_data: &Map<String, Value>,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        let payload = json!({
            "source_id": source_id,
            "target_id": target_id,
            "updated_data": updated_data,
        });
        self.post_json("/graph/relation/edit", &payload, format).await
    }

    // =========================================================================
    // Ollama-compatible passthroughs
    // =========================================================================

    pub async fn ollama_version(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.get("/api/version", &[], format).await
    }

    pub async fn ollama_tags(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.get("/api/tags", &[], format).await
    }

    pub async fn ollama_ps(&self, format: ResponseFormat) -> Result<RemoteResponse> {
        self.get("/api/ps", &[], format).await
    }

    pub async fn ollama_generate(
        &self,
        payload: &Map<String, Value>,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        self.post_json("/api/generate", payload, format).await
    }

    pub async fn ollama_chat(
        &self,
        payload: &Map<String, Value>,
        format: ResponseFormat,
    ) -> Result<RemoteResponse> {
        self.post_json("/api/chat", payload, format).await
    }
}
