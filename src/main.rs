//! LightRAG MCP server - main entry point.
//!
//! Resolves configuration (CLI > environment > YAML file > defaults), then
//! serves MCP over stdin/stdout until EOF or Ctrl-C.

use clap::Parser;
use lightrag_mcp::client::BackendClient;
use lightrag_mcp::dispatch::Dispatcher;
use lightrag_mcp::mcp::McpServer;
use lightrag_mcp::tools::ToolCatalog;
use lightrag_mcp::Config;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// MCP server for the LightRAG HTTP API.
#[derive(Debug, Parser)]
#[command(name = "lightrag-mcp", version, about)]
struct Cli {
    /// LightRAG HTTP base URL [default: http://localhost:9621]
    #[arg(long = "service-url", env = "LIGHTRAG_BASE_URL")]
    service_url: Option<String>,

    /// LightRAG API key, if the server was started with one
    #[arg(long = "key", env = "LIGHTRAG_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Per-request timeout, e.g. "150s" or "2m"
    #[arg(long, env = "LIGHTRAG_TIMEOUT", value_parser = humantime_serde::re::humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Comma-separated tool names to advertise (default: all)
    #[arg(long = "enabled-tools", env = "LIGHTRAG_ENABLED_TOOLS", value_delimiter = ',')]
    enabled_tools: Option<Vec<String>>,

    /// Fail on unknown names in the enabled-tools list instead of warning
    #[arg(long)]
    strict_tool_filter: bool,

    /// YAML config file
    #[arg(long, env = "LIGHTRAG_MCP_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Layer CLI/env values over the file (or default) configuration.
    fn resolve(self) -> lightrag_mcp::Result<Config> {
        let base = match &self.config {
            Some(path) => Config::from_yaml_file(path)?,
            None => Config::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(self, mut config: Config) -> Config {
        if let Some(url) = self.service_url {
            config.backend.base_url = url;
        }
        if let Some(key) = self.key.filter(|k| !k.is_empty()) {
            config.backend.api_key = Some(key);
        }
        if let Some(timeout) = self.timeout {
            config.backend.timeout = timeout;
        }
        if let Some(enabled) = self.enabled_tools {
            let enabled: Vec<String> = enabled
                .into_iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();
            config.tools.enabled = Some(enabled);
        }
        if self.strict_tool_filter {
            config.tools.strict_filter = true;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Cli::parse().resolve()?;

    // Initialize observability
    lightrag_mcp::observability::init_tracing(&config.observability);

    let client = Arc::new(BackendClient::new(&config.backend)?);
    let catalog = Arc::new(ToolCatalog::from_config(&config.tools)?);
    let dispatcher = Dispatcher::new(client, catalog);

    tracing::info!("Starting LightRAG MCP server");
    tracing::info!("  Base URL: {}", config.backend.base_url);
    tracing::info!(
        "  API key: {}",
        if config.backend.api_key.is_some() { "<set>" } else { "<none>" }
    );
    tracing::info!("  Timeout: {:?}", config.backend.timeout);

    let server = McpServer::new(dispatcher, config.server.clone());
    let cancel = server.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    server.serve_stdio().await?;
    Ok(())
}
