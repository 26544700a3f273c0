//! Async wrapper around the synchronous search client.
//!
//! The MCP server runs on tokio; searches go through
//! `tokio::task::spawn_blocking` so the blocking HTTP call never stalls the
//! runtime.

use crate::error::{ApiError, ApiResult};
use crate::models::DeedHit;
use crate::repositories::SearchIndex;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Async search operations used by the MCP server.
#[async_trait]
pub trait AsyncSearchClient: Send + Sync {
    async fn search(&self, index: &str, body: Value, size: usize) -> ApiResult<Vec<DeedHit>>;
}

/// Async wrapper around any [`SearchIndex`].
#[derive(Clone)]
pub struct AsyncSearchClientImpl {
    index: Arc<dyn SearchIndex>,
}

impl AsyncSearchClientImpl {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl AsyncSearchClient for AsyncSearchClientImpl {
    async fn search(&self, index: &str, body: Value, size: usize) -> ApiResult<Vec<DeedHit>> {
        let client = self.index.clone();
        let index = index.to_string();

        tokio::task::spawn_blocking(move || client.search(&index, &body, size))
            .await
            .map_err(|e| ApiError::HttpError(format!("Task join error: {}", e)))?
    }
}
