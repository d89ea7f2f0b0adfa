use crate::client::MemoryApiClient;
use crate::error::ApiError;
use crate::render::{
    format_deleted, format_memory_detail, format_memory_list, format_not_found,
    format_search_results, format_stored,
};
use crate::types::{ListQuery, SearchRequest, StoreMemoryRequest};

/// Text handed back to the caller of a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub text: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    fn failure(tool: &'static str, error: &ApiError) -> Self {
        tracing::warn!(tool, %error, "memory API call failed");
        Self::error(format!("Error: {error}"))
    }

    fn lookup_failure(tool: &'static str, memory_id: i64, error: &ApiError) -> Self {
        if error.is_not_found() {
            tracing::debug!(tool, memory_id, "memory not found");
            return Self::error(format_not_found(memory_id));
        }
        Self::failure(tool, error)
    }
}

/// The five memory tools. Inputs are already validated; every API failure
/// is turned into an error result here and never propagates further.
#[derive(Debug, Clone)]
pub struct MemoryTools {
    client: MemoryApiClient,
}

impl MemoryTools {
    #[must_use]
    pub fn new(client: MemoryApiClient) -> Self {
        Self { client }
    }

    pub async fn store_memory(&self, request: StoreMemoryRequest) -> ToolResult {
        tracing::debug!(memory_type = %request.memory_type, "store_memory");
        match self.client.store_memory(&request).await {
            Ok(stored) => ToolResult::ok(format_stored(&stored)),
            Err(error) => ToolResult::failure("store_memory", &error),
        }
    }

    pub async fn search_memory(&self, request: SearchRequest) -> ToolResult {
        tracing::debug!(mode = %request.mode, limit = request.limit, "search_memory");
        match self.client.search(&request).await {
            Ok(response) => ToolResult::ok(format_search_results(&response)),
            Err(error) => ToolResult::failure("search_memory", &error),
        }
    }

    pub async fn list_memories(&self, query: ListQuery) -> ToolResult {
        tracing::debug!(limit = query.limit, offset = query.offset, "list_memories");
        match self.client.list_memories(&query).await {
            Ok(page) => ToolResult::ok(format_memory_list(&page, query.offset, query.limit)),
            Err(error) => ToolResult::failure("list_memories", &error),
        }
    }

    pub async fn get_memory(&self, memory_id: i64) -> ToolResult {
        tracing::debug!(memory_id, "get_memory");
        match self.client.get_memory(memory_id).await {
            Ok(record) => ToolResult::ok(format_memory_detail(&record)),
            Err(error) => ToolResult::lookup_failure("get_memory", memory_id, &error),
        }
    }

    pub async fn delete_memory(&self, memory_id: i64) -> ToolResult {
        tracing::debug!(memory_id, "delete_memory");
        match self.client.delete_memory(memory_id).await {
            Ok(()) => ToolResult::ok(format_deleted(memory_id)),
            Err(error) => ToolResult::lookup_failure("delete_memory", memory_id, &error),
        }
    }
}
