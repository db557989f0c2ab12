//! Typed request bodies shared by the client and the tool catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Retrieval mode for RAG queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Local,
    Global,
    Hybrid,
    Naive,
    #[default]
    Mix,
    Bypass,
}

/// Body of `POST /query` and `POST /query/stream`.
///
/// Unset optional fields are omitted on the wire so backend defaults apply.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct QueryRequest {
    /// The question to answer.
    pub query: String,

    /// Retrieval mode. The backend defaults to `mix`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<QueryMode>,

    /// Return only the retrieved context, without generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_need_context: Option<bool>,

    /// Return only the generated prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_need_prompt: Option<bool>,

    /// Response format hint, e.g. "Multiple Paragraphs".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub top_k: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub chunk_top_k: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub max_entity_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub max_relation_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub max_total_tokens: Option<u32>,

    /// Prior turns as `{role, content}` objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<Map<String, Value>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_turns: Option<u32>,

    /// Restrict retrieval to these document ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_rerank: Option<bool>,

    /// Fields this crate does not model, forwarded untouched so newer
    /// backend options keep working.
    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: Map<String, Value>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_omitted() {
        let req: QueryRequest =
            serde_json::from_value(json!({"query": "ping", "mode": "hybrid", "top_k": 5})).unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"query": "ping", "mode": "hybrid", "top_k": 5})
        );
    }

    #[test]
    fn test_unknown_fields_are_forwarded() {
        let req: QueryRequest =
            serde_json::from_value(json!({"query": "ping", "include_references": true})).unwrap();
        assert_eq!(req.extra.get("include_references"), Some(&json!(true)));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"query": "ping", "include_references": true})
        );
    }

    #[test]
    fn test_bad_mode_rejected() {
        let res = serde_json::from_value::<QueryRequest>(json!({"query": "q", "mode": "fast"}));
        assert!(res.is_err());
    }

    #[test]
    fn test_schema_requires_query() {
        let schema = serde_json::to_value(schemars::schema_for!(QueryRequest)).unwrap();
        assert_eq!(schema["required"], json!(["query"]));
        assert!(schema["properties"]["top_k"].is_object());
    }
}
