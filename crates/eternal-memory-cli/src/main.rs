use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eternal_memory_core::{
    ListMemoriesArgs, MemoryApiClient, MemoryApiConfig, MemoryTools, SearchMemoryArgs,
    StoreMemoryArgs, ToolResult,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "eternal-memory")]
#[command(about = "Eternal Memory CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store a new memory
    Store {
        #[arg(long = "type")]
        memory_type: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        source: Option<String>,
        /// Metadata as a JSON object
        #[arg(long)]
        meta: Option<String>,
    },
    /// Search memories
    Search {
        query: String,
        #[arg(long = "type")]
        types: Vec<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        min_similarity: Option<f64>,
        #[arg(long)]
        mode: Option<String>,
    },
    /// List memories with pagination
    List {
        #[arg(long = "type")]
        memory_type: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show a memory by ID
    Get { memory_id: i64 },
    /// Delete a memory by ID
    Delete { memory_id: i64 },
}

async fn run(tools: &MemoryTools, command: Command) -> Result<ToolResult> {
    let result = match command {
        Command::Store {
            memory_type,
            title,
            content,
            source,
            meta,
        } => {
            let meta = meta
                .map(|raw| serde_json::from_str(&raw).context("parse --meta as JSON"))
                .transpose()?;
            let request = StoreMemoryArgs {
                memory_type,
                title,
                content,
                source,
                meta,
            }
            .validate()?;
            tools.store_memory(request).await
        }
        Command::Search {
            query,
            types,
            limit,
            min_similarity,
            mode,
        } => {
            let request = SearchMemoryArgs {
                query,
                types: (!types.is_empty()).then_some(types),
                limit,
                min_similarity,
                mode,
            }
            .validate()?;
            tools.search_memory(request).await
        }
        Command::List {
            memory_type,
            source,
            limit,
            offset,
        } => {
            let query = ListMemoriesArgs {
                memory_type,
                source,
                limit,
                offset,
            }
            .validate()?;
            tools.list_memories(query).await
        }
        Command::Get { memory_id } => tools.get_memory(memory_id).await,
        Command::Delete { memory_id } => tools.delete_memory(memory_id).await,
    };
    Ok(result)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = MemoryApiConfig::from_env()?;
    let tools = MemoryTools::new(MemoryApiClient::new(config)?);

    let result = run(&tools, cli.command).await?;
    println!("{}", result.text);

    if result.is_error {
        std::process::exit(1);
    }

    Ok(())
}
