//! Core types for the bridge.
//!
//! - **Errors**: the error taxonomy shared by client and dispatcher
//! - **Config**: backend, tool filter, server and observability settings

mod config;
mod errors;

pub use config::{
    BackendConfig, Config, ObservabilityConfig, ServerConfig, ToolsConfig, DEFAULT_BASE_URL,
};
pub use errors::{Error, Result};
