mod server;

use eternal_memory_core::{MemoryApiClient, MemoryApiConfig, MemoryTools};
use mcpkit::prelude::*;
use mcpkit::transport::stdio::StdioTransport;
use server::EternalMemoryMcp;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), McpError> {
    let config = match MemoryApiConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("FATAL: {error}");
            std::process::exit(1);
        }
    };
    init_tracing();

    let client = MemoryApiClient::new(config).map_err(|error| {
        tracing::error!(%error, "failed to build HTTP client");
        McpError::internal(error.to_string())
    })?;
    let service = EternalMemoryMcp::new(MemoryTools::new(client));
    let transport = StdioTransport::new();

    let server = ServerBuilder::new(service.clone())
        .with_tools(service)
        .build();

    // Not gated by RUST_LOG.
    eprintln!("Eternal Memory MCP server running on stdio");
    server.serve(transport).await.inspect_err(|error| {
        tracing::error!(%error, "MCP server stopped with an error");
    })
}
