//! Typed tool arguments.
//!
//! Arguments are schema-checked by the catalog first; these structs then give
//! the dispatcher language-native values and apply the documented defaults.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::types::{Error, Result};

/// Decode a schema-checked argument object into `T`.
pub fn parse_args<T: DeserializeOwned>(args: &Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| Error::invalid_arguments(format!("Invalid arguments: {}", e)))
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginArgs {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub scope: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadFileArgs {
    pub file_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadFilesArgs {
    pub file_paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertTextArgs {
    pub text: String,
    #[serde(default)]
    pub file_source: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertTextsArgs {
    pub texts: Vec<String>,
    #[serde(default)]
    pub file_sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteByIdsArgs {
    pub doc_ids: Vec<String>,
    #[serde(default)]
    pub delete_file: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteEntityArgs {
    pub entity_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRelationArgs {
    pub source_entity: String,
    pub target_entity: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackStatusArgs {
    pub track_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubgraphArgs {
    pub label: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default = "default_max_nodes")]
    pub max_nodes: u32,
}

fn default_max_depth() -> u32 {
    3
}

fn default_max_nodes() -> u32 {
    1000
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityExistsArgs {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEntityArgs {
    pub entity_name: String,
    pub updated_data: Map<String, Value>,
    #[serde(default)]
    pub allow_rename: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRelationArgs {
    pub source_id: String,
    pub target_id: String,
    pub updated_data: Map<String, Value>,
}

/// Ollama passthrough body, forwarded verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct PayloadArgs {
    pub payload: Map<String, Value>,
}
