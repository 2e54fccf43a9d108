//! Highspot MCP CLI
//!
//! Run the server's operations from a terminal without an MCP host.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::Value;

use highspot_mcp::calc::{evaluate, format_number};
use highspot_mcp::error::Result;
use highspot_mcp::mcp::{build_registry, Registry, SearchContext};
use highspot_mcp::search::{EnvCredentials, HighspotClient, SearchConfig, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(name = "highspot-mcp")]
#[command(about = "Addition and Highspot search from the command line")]
#[command(version)]
struct Cli {
    /// Highspot items search endpoint
    #[arg(long, env = "HIGHSPOT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "HIGHSPOT_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sum an expression like 2+3+4
    Add {
        /// Numbers separated by '+'
        expression: String,
    },
    /// Search Highspot (reads HIGHSPOT_USERNAME / HIGHSPOT_PASSWORD)
    Search {
        /// Search text
        query: String,
    },
    /// List tools
    Tools,
    /// List prompts
    Prompts,
    /// Invoke any tool or prompt by name
    Call {
        /// Operation name
        name: String,
        /// Arguments as JSON, e.g. '{"expression": "1+2"}', or a bare value for prompts
        arguments: Option<String>,
    },
}

fn build(cli: &Cli) -> Result<(Arc<SearchContext>, Registry)> {
    let config = SearchConfig {
        base_url: cli.base_url.clone(),
        timeout: cli.timeout_secs.map(Duration::from_secs),
        ..Default::default()
    };
    let client = HighspotClient::new(config)?;
    let search = Arc::new(SearchContext::new(client, Arc::new(EnvCredentials::new())));
    let registry = build_registry(search.clone())?;
    Ok((search, registry))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (search, registry) = build(&cli)?;

    match cli.command {
        Commands::Add { expression } => {
            let sum = evaluate(&expression)?;
            println!("{}", format_number(sum));
        }

        Commands::Search { query } => {
            let results = search.search(&query).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }

        Commands::Tools => {
            for tool in registry.tools() {
                println!("{} - {}", tool.name, tool.description);
            }
        }

        Commands::Prompts => {
            for prompt in registry.prompts() {
                let arguments: Vec<String> = prompt
                    .arguments
                    .iter()
                    .map(|a| {
                        if a.required.unwrap_or(false) {
                            a.name.clone()
                        } else {
                            format!("[{}]", a.name)
                        }
                    })
                    .collect();
                println!(
                    "{}({}) - {}",
                    prompt.name,
                    arguments.join(", "),
                    prompt.description.unwrap_or_default()
                );
            }
        }

        Commands::Call { name, arguments } => {
            // Anything that isn't JSON is passed as a bare prompt argument
            let arguments: Value = match arguments {
                Some(raw) => serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
                None => Value::Null,
            };

            let envelope = registry.call(&name, arguments).await?;
            for text in envelope.texts() {
                println!("{}", text);
            }
            if envelope.is_error() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
