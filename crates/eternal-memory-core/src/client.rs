use crate::config::MemoryApiConfig;
use crate::error::ApiError;
use crate::types::{
    ListQuery, MemoryPage, MemoryRecord, SearchRequest, SearchResponse, StoreMemoryRequest,
    StoredMemory,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(30_000);

const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for the remote memory API.
///
/// Every call is a single attempt bounded by one deadline covering the
/// send and the body read.
#[derive(Debug, Clone)]
pub struct MemoryApiClient {
    http: Client,
    config: MemoryApiConfig,
    timeout: Duration,
}

impl MemoryApiClient {
    pub fn new(config: MemoryApiConfig) -> Result<Self, ApiError> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(config: MemoryApiConfig, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            config,
            timeout,
        })
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{path}", self.config.base_url);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, self.config.api_key.as_str());
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, ApiError>((status, text))
        };
        let (status, text) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| ApiError::Timeout(self.timeout))??;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if method == Method::DELETE {
            return Ok(json!({ "success": true }));
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn execute_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let value = self.execute(method, path, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn store_memory(
        &self,
        request: &StoreMemoryRequest,
    ) -> Result<StoredMemory, ApiError> {
        let body = serde_json::to_value(request)?;
        self.execute_as(Method::POST, "/api/v1/memories", Some(&body))
            .await
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        let body = serde_json::to_value(request)?;
        self.execute_as(Method::POST, "/api/v1/search", Some(&body)).await
    }

    pub async fn list_memories(&self, query: &ListQuery) -> Result<MemoryPage, ApiError> {
        let path = format!("/api/v1/memories?{}", list_query_string(query));
        self.execute_as(Method::GET, &path, None).await
    }

    pub async fn get_memory(&self, memory_id: i64) -> Result<MemoryRecord, ApiError> {
        let path = format!("/api/v1/memories/{memory_id}");
        self.execute_as(Method::GET, &path, None).await
    }

    pub async fn delete_memory(&self, memory_id: i64) -> Result<(), ApiError> {
        let path = format!("/api/v1/memories/{memory_id}");
        self.execute(Method::DELETE, &path, None).await?;
        Ok(())
    }
}

#[must_use]
pub fn list_query_string(query: &ListQuery) -> String {
    let mut params = url::form_urlencoded::Serializer::new(String::new());
    if let Some(memory_type) = query.memory_type {
        params.append_pair("type", memory_type.as_str());
    }
    if let Some(source) = query.source.as_deref().filter(|s| !s.is_empty()) {
        params.append_pair("source", source);
    }
    params.append_pair("limit", &query.limit.to_string());
    params.append_pair("offset", &query.offset.to_string());
    params.finish()
}
