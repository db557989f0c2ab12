//! Uniform tool result envelope.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::types::Error;

/// One unit of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ContentBlock {
    Json(Value),
    Text(String),
}

impl ContentBlock {
    /// MCP content item. MCP has no JSON block type, so structured values
    /// travel as pretty-printed text.
    pub fn to_mcp(&self) -> Value {
        let text = match self {
            ContentBlock::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ContentBlock::Text(text) => text.clone(),
        };
        json!({ "type": "text", "text": text })
    }
}

/// Ordered content blocks returned for one tool call. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
}

impl ToolResult {
    pub fn json(value: Value) -> Self {
        Self {
            content: vec![ContentBlock::Json(value)],
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
        }
    }

    /// Single text block describing `err`.
    pub fn from_error(err: &Error) -> Self {
        Self::text(err.to_tool_message())
    }

    /// The lone JSON value, if this is a single JSON block.
    pub fn as_json(&self) -> Option<&Value> {
        match self.content.as_slice() {
            [ContentBlock::Json(value)] => Some(value),
            _ => None,
        }
    }

    /// The lone text, if this is a single text block.
    pub fn as_text(&self) -> Option<&str> {
        match self.content.as_slice() {
            [ContentBlock::Text(text)] => Some(text),
            _ => None,
        }
    }

    pub fn to_mcp_content(&self) -> Vec<Value> {
        self.content.iter().map(ContentBlock::to_mcp).collect()
    }
}
