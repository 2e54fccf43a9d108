//! Highspot MCP Server
//!
//! Run with: highspot-mcp-server

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use highspot_mcp::error::Result;
use highspot_mcp::mcp::{build_registry, McpServer, RegistryHandler, SearchContext};
use highspot_mcp::search::{EnvCredentials, HighspotClient, SearchConfig, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(name = "highspot-mcp-server")]
#[command(about = "MCP server for addition and Highspot search")]
#[command(version)]
struct Args {
    /// Highspot items search endpoint
    #[arg(long, env = "HIGHSPOT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds (unset = no timeout)
    #[arg(long, env = "HIGHSPOT_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is for MCP protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = SearchConfig {
        base_url: args.base_url,
        timeout: args.timeout_secs.map(Duration::from_secs),
        ..Default::default()
    };
    let client = HighspotClient::new(config)?;

    // Credentials are read from the environment on every search
    let search = SearchContext::new(client, Arc::new(EnvCredentials::new()));
    let registry = build_registry(Arc::new(search))?;

    tracing::info!(
        "Highspot MCP server starting with {} operations...",
        registry.len()
    );
    let server = McpServer::new(RegistryHandler::new(Arc::new(registry)));
    server.run().await?;

    Ok(())
}
