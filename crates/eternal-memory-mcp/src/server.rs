//! MCP tool surface for the memory API.
//!
//! Handlers are written out by hand so argument names on the wire match the
//! declared schemas exactly (`type` in particular).

use eternal_memory_core::{
    ListMemoriesArgs, MemoryIdArgs, MemoryTools, SearchMemoryArgs, StoreMemoryArgs, ToolResult,
    ValidationError,
};
use mcpkit::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

pub const SERVER_NAME: &str = "eternal-memory";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const STORE_MEMORY: &str = "store_memory";
const SEARCH_MEMORY: &str = "search_memory";
const LIST_MEMORIES: &str = "list_memories";
const GET_MEMORY: &str = "get_memory";
const DELETE_MEMORY: &str = "delete_memory";
const TOOL_NAMES: [&str; 5] = [
    STORE_MEMORY,
    SEARCH_MEMORY,
    LIST_MEMORIES,
    GET_MEMORY,
    DELETE_MEMORY,
];

#[derive(Clone)]
pub struct EternalMemoryMcp {
    tools: Arc<MemoryTools>,
}

impl EternalMemoryMcp {
    pub fn new(tools: MemoryTools) -> Self {
        Self {
            tools: Arc::new(tools),
        }
    }

    async fn dispatch(&self, name: &str, args: Value) -> Result<ToolOutput, McpError> {
        let result = match name {
            STORE_MEMORY => {
                let args: StoreMemoryArgs = decode(name, args)?;
                let request = validated(name, args.validate())?;
                self.tools.store_memory(request).await
            }
            SEARCH_MEMORY => {
                let args: SearchMemoryArgs = decode(name, args)?;
                let request = validated(name, args.validate())?;
                self.tools.search_memory(request).await
            }
            LIST_MEMORIES => {
                let args: ListMemoriesArgs = decode(name, args)?;
                let query = validated(name, args.validate())?;
                self.tools.list_memories(query).await
            }
            GET_MEMORY => {
                let MemoryIdArgs { memory_id } = decode(name, args)?;
                self.tools.get_memory(memory_id).await
            }
            DELETE_MEMORY => {
                let MemoryIdArgs { memory_id } = decode(name, args)?;
                self.tools.delete_memory(memory_id).await
            }
            _ => {
                return Err(McpError::method_not_found_with_suggestions(
                    name,
                    TOOL_NAMES.iter().map(ToString::to_string).collect(),
                ));
            }
        };
        Ok(to_tool_output(result))
    }
}

/// Absent arguments read as an empty object.
fn decode<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, McpError> {
    let args = if args.is_null() {
        Value::Object(Map::new())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|error| McpError::invalid_params(tool, error.to_string()))
}

fn validated<T>(tool: &str, input: Result<T, ValidationError>) -> Result<T, McpError> {
    input.map_err(|error| McpError::invalid_params(tool, error.to_string()))
}

fn to_tool_output(result: ToolResult) -> ToolOutput {
    if result.is_error {
        ToolOutput::error(result.text)
    } else {
        ToolOutput::text(result.text)
    }
}

fn catalogue() -> Vec<Tool> {
    vec![
        Tool::new(STORE_MEMORY)
            .description("Store a new memory (decision, code, log, or conversation)")
            .input_schema(StoreMemoryArgs::input_schema())
            .annotations(ToolAnnotations::default().with_read_only(false)),
        Tool::new(SEARCH_MEMORY)
            .description("Search memories using semantic similarity")
            .input_schema(SearchMemoryArgs::input_schema())
            .annotations(ToolAnnotations::read_only().with_idempotent(true)),
        Tool::new(LIST_MEMORIES)
            .description("List stored memories with pagination")
            .input_schema(ListMemoriesArgs::input_schema())
            .annotations(ToolAnnotations::read_only().with_idempotent(true)),
        Tool::new(GET_MEMORY)
            .description("Get full details of a memory by ID")
            .input_schema(MemoryIdArgs::input_schema("Memory ID to retrieve"))
            .annotations(ToolAnnotations::read_only().with_idempotent(true)),
        Tool::new(DELETE_MEMORY)
            .description("Delete a memory by ID (irreversible)")
            .input_schema(MemoryIdArgs::input_schema("Memory ID to delete"))
            .annotations(ToolAnnotations::destructive()),
    ]
}

impl ServerHandler for EternalMemoryMcp {
    fn server_info(&self) -> ServerInfo {
        ServerInfo::new(SERVER_NAME, SERVER_VERSION)
    }

    fn capabilities(&self) -> ServerCapabilities {
        ServerCapabilities::new().with_tools()
    }
}

impl ToolHandler for EternalMemoryMcp {
    fn list_tools(
        &self,
        _ctx: &Context<'_>,
    ) -> impl std::future::Future<Output = Result<Vec<Tool>, McpError>> + Send {
        async move { Ok(catalogue()) }
    }

    fn call_tool(
        &self,
        name: &str,
        args: Value,
        _ctx: &Context<'_>,
    ) -> impl std::future::Future<Output = Result<ToolOutput, McpError>> + Send {
        async move { self.dispatch(name, args).await }
    }
}
