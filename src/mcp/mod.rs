//! MCP stdio transport layer.
//!
//! Newline-delimited JSON-RPC 2.0 on stdin/stdout. Tool failures are always
//! successful JSON-RPC replies carrying error text; JSON-RPC errors are
//! reserved for malformed protocol traffic.

pub mod codec;
pub mod router;
pub mod server;

pub use server::McpServer;
