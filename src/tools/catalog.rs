//! Tool catalog: advertised descriptors and compiled input schemas.
//!
//! A pure function of the enabled-tools filter: it never looks at session or
//! network state, and its order is always [`ToolKind::ALL`] order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::kind::ToolKind;
use crate::types::{Error, Result, ToolsConfig};

// =============================================================================
// Tool descriptor
// =============================================================================

/// What the host sees for one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn for_kind(kind: ToolKind) -> Self {
        Self {
            name: kind.name().to_string(),
            description: kind.description(),
            input_schema: kind.input_schema(),
        }
    }
}

// =============================================================================
// Tool catalog
// =============================================================================

struct CatalogEntry {
    kind: ToolKind,
    descriptor: ToolDescriptor,
    validator: jsonschema::Validator,
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable set of enabled tools.
#[derive(Debug)]
pub struct ToolCatalog {
    entries: Vec<CatalogEntry>,
}

impl ToolCatalog {
    /// Every known tool.
    pub fn full() -> Result<Self> {
        Self::build(ToolKind::ALL.iter().copied())
    }

    pub fn from_config(config: &ToolsConfig) -> Result<Self> {
        Self::with_enabled(config.enabled.as_deref(), config.strict_filter)
    }

    /// Project the full catalog onto `enabled`, keeping catalog order.
    ///
    /// `None` enables everything. Names matching no tool are logged, or
    /// rejected when `strict` is set.
    pub fn with_enabled(enabled: Option<&[String]>, strict: bool) -> Result<Self> {
        let Some(enabled) = enabled else {
            return Self::full();
        };

        let unknown: Vec<&str> = enabled
            .iter()
            .map(String::as_str)
            .filter(|name| ToolKind::from_name(name).is_none())
            .collect();
        if !unknown.is_empty() {
            if strict {
                return Err(Error::config(format!(
                    "unknown tool names in filter: {}",
                    unknown.join(", ")
                )));
            }
            for name in &unknown {
                tracing::warn!("Ignoring unknown tool in enabled list: {}", name);
            }
        }

        Self::build(
            ToolKind::ALL
                .iter()
                .copied()
                .filter(|kind| enabled.iter().any(|name| name == kind.name())),
        )
    }

    fn build(kinds: impl Iterator<Item = ToolKind>) -> Result<Self> {
        let mut entries = Vec::new();
        for kind in kinds {
            let descriptor = ToolDescriptor::for_kind(kind);
            let validator = jsonschema::validator_for(&descriptor.input_schema).map_err(|e| {
                Error::internal(format!("Invalid input schema for {}: {}", kind, e))
            })?;
            entries.push(CatalogEntry {
                kind,
                descriptor,
                validator,
            });
        }
        Ok(Self { entries })
    }

    /// Resolve a host-supplied name to an enabled tool.
    pub fn resolve(&self, name: &str) -> Result<ToolKind> {
        self.entries
            .iter()
            .find(|entry| entry.descriptor.name == name)
            .map(|entry| entry.kind)
            .ok_or_else(|| Error::unknown_tool(name))
    }

    /// Check if a tool is enabled.
    pub fn has_tool(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Enabled descriptors in catalog order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor)
    }

    /// Enabled tool kinds in catalog order.
    pub fn kinds(&self) -> impl Iterator<Item = ToolKind> + '_ {
        self.entries.iter().map(|entry| entry.kind)
    }

    /// Validate arguments against a tool's input schema.
    ///
    /// Returns a list of validation errors (empty = valid).
    pub fn validate_params(&self, kind: ToolKind, params: &Value) -> Result<Vec<String>> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.kind == kind)
            .ok_or_else(|| Error::unknown_tool(kind.name()))?;

        Ok(entry
            .validator
            .iter_errors(params)
            .map(|e| e.to_string())
            .collect())
    }

    /// Number of enabled tools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
