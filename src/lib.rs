//! # LightRAG MCP - tool bridge for the LightRAG HTTP API
//!
//! Exposes a remote LightRAG deployment as schema-validated MCP tools:
//! - A static catalog of tools with literal example payloads
//! - Argument validation against each tool's JSON schema before any request
//! - One backend call per tool call, with API-key and bearer-token auth
//! - Streamed queries drained and concatenated into one result
//! - Every failure surfaced in-band as text, never as a protocol fault
//!
//! ## Architecture
//!
//! ```text
//!   host (stdio) → mcp::McpServer → dispatch::Dispatcher → client::BackendClient → LightRAG
//!                                      │
//!                                      └── tools::ToolCatalog (descriptors + schemas)
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod client;
pub mod dispatch;
pub mod mcp;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;
pub mod validation;

pub use client::BackendClient;
pub use dispatch::{ContentBlock, Dispatcher, ToolResult};
pub use tools::{ToolCatalog, ToolDescriptor, ToolKind};
pub use types::{Config, Error, Result};
