//! Shared harness: an in-process mock LightRAG backend plus dispatcher
//! helpers pointed at it.

#![allow(dead_code)]

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use lightrag_mcp::types::BackendConfig;
use lightrag_mcp::{BackendClient, Dispatcher, ToolCatalog};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub api_key: Option<String>,
    pub accept: Option<String>,
    pub body: String,
}

#[derive(Debug, Default)]
pub struct MockState {
    requests: Mutex<Vec<Recorded>>,
}

impl MockState {
    fn record(&self, method: Method, uri: &Uri, headers: &HeaderMap, body: String) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            authorization: header("authorization"),
            api_key: header("x-api-key"),
            accept: header("accept"),
            body,
        });
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Last request made to `path`.
    pub fn last(&self, path: &str) -> Recorded {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.path == path)
            .unwrap_or_else(|| panic!("no request recorded for {}", path))
    }
}

type Shared = State<Arc<MockState>>;

async fn health(State(state): Shared, method: Method, uri: Uri, headers: HeaderMap) -> Json<Value> {
    state.record(method, &uri, &headers, String::new());
    Json(json!({"status": "healthy"}))
}

async fn login(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    state.record(method, &uri, &headers, body);
    Json(json!({"token": "abc", "access_token": "xyz", "token_type": "bearer"}))
}

async fn query(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> Json<Value> {
    state.record(method, &uri, &headers, request.to_string());
    if request["query"] == "other" {
        Json(json!({"other": "value"}))
    } else {
        Json(json!({"response": "pong"}))
    }
}

async fn query_stream(State(state): Shared, method: Method, uri: Uri, headers: HeaderMap) -> String {
    state.record(method, &uri, &headers, String::new());
    "{\"response\": \"line one\"}\n\n{\"response\": \"line two\"}\r\n".to_string()
}

async fn paginated(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> Json<Value> {
    state.record(method, &uri, &headers, request.to_string());
    Json(json!({"echo": request}))
}

async fn status_counts(State(state): Shared, method: Method, uri: Uri, headers: HeaderMap) -> String {
    state.record(method, &uri, &headers, String::new());
    "plain body".to_string()
}

async fn graphs(State(state): Shared, method: Method, uri: Uri, headers: HeaderMap) -> Json<Value> {
    state.record(method, &uri, &headers, String::new());
    Json(json!({"nodes": [], "edges": []}))
}

async fn upload(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Json<Value> {
    state.record(method, &uri, &headers, String::new());
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap();
        fields.push(json!({
            "field": name,
            "filename": file_name,
            "content_type": content_type,
            "size": data.len(),
        }));
    }
    Json(json!({"status": "success", "fields": fields}))
}

/// Every route without a dedicated handler: record the request and answer
/// with where it landed.
async fn record_any(
    State(state): Shared,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    let reply = json!({"method": method.as_str(), "path": uri.path()});
    state.record(method, &uri, &headers, body);
    Json(reply)
}

/// Start the mock backend on an ephemeral loopback port.
pub async fn start_mock_backend() -> (String, Arc<MockState>) {
    let state = Arc::new(MockState::default());
    let app = Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/query", post(query))
        .route("/query/stream", post(query_stream))
        .route("/documents/paginated", post(paginated))
        .route("/documents/status_counts", get(status_counts))
        .route("/documents/upload", post(upload))
        .route("/graphs", get(graphs))
        .fallback(record_any)
        .with_state(state.clone());

    (serve(app).await, state)
}

/// Backend answering every request with `status` and an empty body.
pub async fn start_status_backend(status: u16) -> String {
    let status = StatusCode::from_u16(status).unwrap();
    serve(Router::new().fallback(move || async move { status })).await
}

/// Backend that holds every request for `delay` before answering.
pub async fn start_slow_backend(delay: Duration) -> String {
    serve(Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        Json(json!({"status": "late"}))
    }))
    .await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn dispatcher_for(base_url: &str, api_key: Option<&str>) -> Dispatcher {
    dispatcher_with_timeout(base_url, api_key, Duration::from_secs(10))
}

pub fn dispatcher_with_timeout(
    base_url: &str,
    api_key: Option<&str>,
    timeout: Duration,
) -> Dispatcher {
    let config = BackendConfig {
        base_url: base_url.to_string(),
        api_key: api_key.map(str::to_string),
        timeout,
    };
    let client = Arc::new(BackendClient::new(&config).unwrap());
    let catalog = Arc::new(ToolCatalog::full().unwrap());
    Dispatcher::new(client, catalog)
}
