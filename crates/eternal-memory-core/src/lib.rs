pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod schema;
pub mod service;
pub mod types;

pub use client::{MemoryApiClient, REQUEST_TIMEOUT};
pub use config::{ConfigError, MemoryApiConfig};
pub use error::ApiError;
pub use schema::{
    ListMemoriesArgs, MemoryIdArgs, SearchMemoryArgs, StoreMemoryArgs, ValidationError,
};
pub use service::{MemoryTools, ToolResult};
pub use types::{
    Chunk, ListQuery, MemoryPage, MemoryRecord, MemorySummary, MemoryType, SearchMode,
    SearchRequest, SearchResponse, StoreMemoryRequest, StoredMemory,
};
