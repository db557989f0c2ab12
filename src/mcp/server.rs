//! Stdio MCP server: read loop and per-message handling.

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio_util::sync::CancellationToken;

use crate::dispatch::Dispatcher;
use crate::mcp::codec::{read_message, write_message};
use crate::mcp::router::{failure, route_message, PARSE_ERROR};
use crate::types::ServerConfig;

/// MCP server wrapping the dispatcher.
#[derive(Debug)]
pub struct McpServer {
    dispatcher: Dispatcher,
    config: ServerConfig,
    cancel: CancellationToken,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher, config: ServerConfig) -> Self {
        Self {
            dispatcher,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Serve on the process's stdin/stdout.
    pub async fn serve_stdio(&self) -> std::io::Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Run until EOF, cancellation or a fatal I/O error.
    ///
    /// Messages are handled one at a time in arrival order.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(reader);
        tracing::info!(
            "MCP server ready ({} tools advertised)",
            self.dispatcher.catalog().len()
        );

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("MCP server shutting down");
                    break;
                }
                message = read_message(&mut reader, self.config.max_line_bytes) => {
                    let line = match message? {
                        Some(line) => line,
                        None => {
                            tracing::info!("Input closed, stopping");
                            break;
                        }
                    };

                    let reply = match serde_json::from_slice::<Value>(&line) {
                        Ok(request) => route_message(&self.dispatcher, request).await,
                        Err(e) => {
                            tracing::warn!("Unparseable message: {}", e);
                            Some(failure(Value::Null, PARSE_ERROR, &format!("Parse error: {}", e)))
                        }
                    };

                    if let Some(reply) = reply {
                        write_message(&mut writer, &reply).await?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Token that stops [`McpServer::serve`] when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request graceful shutdown.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}
