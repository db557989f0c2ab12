//! Closed set of tools the bridge can dispatch.

use std::fmt;
use std::str::FromStr;

use crate::types::Error;

/// Every tool the bridge knows, in catalog order.
///
/// Descriptor construction and dispatch both `match` on this enum, so a
/// tool cannot be advertised without a handler or handled without being
/// advertised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Health,
    AuthStatus,
    AuthLogin,
    DocumentsScan,
    DocumentsUploadFile,
    DocumentsUploadFiles,
    DocumentsInsertText,
    DocumentsInsertTexts,
    DocumentsClearAll,
    DocumentsListStatuses,
    DocumentsPipelineStatus,
    DocumentsDeleteByIds,
    DocumentsClearCache,
    DocumentsDeleteEntity,
    DocumentsDeleteRelation,
    DocumentsTrackStatus,
    DocumentsPaginated,
    DocumentsStatusCounts,
    Query,
    QueryStream,
    GraphLabels,
    GraphsGet,
    GraphEntityExists,
    GraphUpdateEntity,
    GraphUpdateRelation,
    OllamaVersion,
    OllamaTags,
    OllamaPs,
    OllamaGenerate,
    OllamaChat,
}

impl ToolKind {
    pub const ALL: [ToolKind; 30] = [
        ToolKind::Health,
        ToolKind::AuthStatus,
        ToolKind::AuthLogin,
        ToolKind::DocumentsScan,
        ToolKind::DocumentsUploadFile,
        ToolKind::DocumentsUploadFiles,
        ToolKind::DocumentsInsertText,
        ToolKind::DocumentsInsertTexts,
        ToolKind::DocumentsClearAll,
        ToolKind::DocumentsListStatuses,
        ToolKind::DocumentsPipelineStatus,
        ToolKind::DocumentsDeleteByIds,
        ToolKind::DocumentsClearCache,
        ToolKind::DocumentsDeleteEntity,
        ToolKind::DocumentsDeleteRelation,
        ToolKind::DocumentsTrackStatus,
        ToolKind::DocumentsPaginated,
        ToolKind::DocumentsStatusCounts,
        ToolKind::Query,
        ToolKind::QueryStream,
        ToolKind::GraphLabels,
        ToolKind::GraphsGet,
        ToolKind::GraphEntityExists,
        ToolKind::GraphUpdateEntity,
        ToolKind::GraphUpdateRelation,
        ToolKind::OllamaVersion,
        ToolKind::OllamaTags,
        ToolKind::OllamaPs,
        ToolKind::OllamaGenerate,
        ToolKind::OllamaChat,
    ];

    /// Wire name advertised to the host.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Health => "health",
            ToolKind::AuthStatus => "auth_status",
            ToolKind::AuthLogin => "auth_login",
            ToolKind::DocumentsScan => "documents_scan",
            ToolKind::DocumentsUploadFile => "documents_upload_file",
            ToolKind::DocumentsUploadFiles => "documents_upload_files",
            ToolKind::DocumentsInsertText => "documents_insert_text",
            ToolKind::DocumentsInsertTexts => "documents_insert_texts",
            ToolKind::DocumentsClearAll => "documents_clear_all",
            ToolKind::DocumentsListStatuses => "documents_list_statuses",
            ToolKind::DocumentsPipelineStatus => "documents_pipeline_status",
            ToolKind::DocumentsDeleteByIds => "documents_delete_by_ids",
            ToolKind::DocumentsClearCache => "documents_clear_cache",
            ToolKind::DocumentsDeleteEntity => "documents_delete_entity",
            ToolKind::DocumentsDeleteRelation => "documents_delete_relation",
            ToolKind::DocumentsTrackStatus => "documents_track_status",
            ToolKind::DocumentsPaginated => "documents_paginated",
            ToolKind::DocumentsStatusCounts => "documents_status_counts",
            ToolKind::Query => "query",
            ToolKind::QueryStream => "query_stream",
            ToolKind::GraphLabels => "graph_labels",
            ToolKind::GraphsGet => "graphs_get",
            ToolKind::GraphEntityExists => "graph_entity_exists",
            ToolKind::GraphUpdateEntity => "graph_update_entity",
            ToolKind::GraphUpdateRelation => "graph_update_relation",
            ToolKind::OllamaVersion => "ollama_version",
            ToolKind::OllamaTags => "ollama_tags",
            ToolKind::OllamaPs => "ollama_ps",
            ToolKind::OllamaGenerate => "ollama_generate",
            ToolKind::OllamaChat => "ollama_chat",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Tools that never mutate backend state.
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            ToolKind::Health
                | ToolKind::AuthStatus
                | ToolKind::DocumentsListStatuses
                | ToolKind::DocumentsPipelineStatus
                | ToolKind::DocumentsTrackStatus
                | ToolKind::DocumentsPaginated
                | ToolKind::DocumentsStatusCounts
                | ToolKind::GraphLabels
                | ToolKind::GraphsGet
                | ToolKind::GraphEntityExists
                | ToolKind::OllamaVersion
                | ToolKind::OllamaTags
                | ToolKind::OllamaPs
        )
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::unknown_tool(s))
    }
}
