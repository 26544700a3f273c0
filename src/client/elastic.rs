//! Client for the Elasticsearch REST API.

use super::{build_agent, join_url, map_error, read_body};
use crate::config::Config;
use crate::error::{ApiError, ApiResult, ConfigResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{BulkResponseBody, BulkSummary, DeedHit, IndexedDeed, SearchResponseBody};
use crate::repositories::SearchIndex;
use serde_json::{json, Value};
use std::sync::Arc;

/// HTTP client for an Elasticsearch cluster, authenticated with an API key.
#[derive(Clone)]
pub struct ElasticClient {
    base_url: String,
    api_key: String,
    agent: Arc<ureq::Agent>,
    metrics: Metrics,
}

impl ElasticClient {
    /// Create a client from configuration.
    ///
    /// Needs `ELASTIC_API_KEY` and either `ELASTIC_URL` or `CLOUD_ID`.
    pub fn new(config: &Config, metrics: Metrics) -> ConfigResult<Self> {
        Ok(Self {
            base_url: config.elasticsearch_url()?,
            api_key: config.elastic_api_key()?.to_string(),
            agent: Arc::new(build_agent(config.request_timeout)),
            metrics,
        })
    }

    /// Create a client against a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            agent: Arc::new(build_agent(10)),
            metrics: Metrics::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let url = join_url(&self.base_url, path);
        tracing::debug!("{} {}", method, url);
        self.agent
            .request(method, &url)
            .set("Authorization", &format!("ApiKey {}", self.api_key))
    }

    /// Run a prepared request and record it in the metrics.
    fn execute(
        &self,
        send: impl FnOnce() -> Result<ureq::Response, ureq::Error>,
    ) -> ApiResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let result = send();
        let failed = match &result {
            Ok(_) => false,
            // A 404 on HEAD is an answer, not a failure
            Err(ureq::Error::Status(404, _)) => false,
            Err(_) => true,
        };
        timer.finish(failed);
        result.map_err(map_error)
    }

    fn index_path(index: &str) -> String {
        format!("/{}", urlencoding::encode(index))
    }

    /// Build the NDJSON body for `_bulk`: one index action and one source line per deed.
    pub fn bulk_body(index: &str, deeds: &[IndexedDeed]) -> ApiResult<String> {
        let mut body = String::new();
        for deed in deeds {
            let action = json!({"index": {"_index": index, "_id": deed.document_id}});
            body.push_str(&serde_json::to_string(&action)?);
            body.push('\n');
            body.push_str(&serde_json::to_string(deed)?);
            body.push('\n');
        }
        Ok(body)
    }
}

impl SearchIndex for ElasticClient {
    fn ping(&self) -> bool {
        match self.execute(|| self.request("GET", "/").call()) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Ping failed: {}", e);
                false
            }
        }
    }

    fn index_exists(&self, index: &str) -> ApiResult<bool> {
        let path = Self::index_path(index);
        match self.execute(|| self.request("HEAD", &path).call()) {
            Ok(_) => Ok(true),
            Err(ApiError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn create_index(&self, index: &str, body: &Value) -> ApiResult<()> {
        let path = Self::index_path(index);
        self.execute(|| self.request("PUT", &path).send_json(body))?;
        Ok(())
    }

    fn bulk_index(&self, index: &str, deeds: &[IndexedDeed]) -> ApiResult<BulkSummary> {
        if deeds.is_empty() {
            return Ok(BulkSummary::default());
        }

        let body = Self::bulk_body(index, deeds)?;
        let response = self.execute(|| {
            self.request("POST", "/_bulk")
                .set("Content-Type", "application/x-ndjson")
                .send_string(&body)
        })?;

        let parsed: BulkResponseBody = serde_json::from_str(&read_body(response)?)?;
        Ok(parsed.into())
    }

    fn search(&self, index: &str, body: &Value, size: usize) -> ApiResult<Vec<DeedHit>> {
        let path = format!("{}/_search?size={}", Self::index_path(index), size);
        let response = self.execute(|| self.request("POST", &path).send_json(body))?;

        let parsed: SearchResponseBody = serde_json::from_str(&read_body(response)?)?;
        Ok(parsed.hits.hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_body_is_ndjson_keyed_by_document_id() {
        let deeds = vec![
            IndexedDeed {
                document_id: "B-1".to_string(),
                grantors: "John Penn".to_string(),
                execution_date: Some("1755-03-03".to_string()),
                ..Default::default()
            },
            IndexedDeed {
                document_id: "B-2".to_string(),
                ..Default::default()
            },
        ];

        let body = ElasticClient::bulk_body("land_deeds", &deeds).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(body.ends_with('\n'));

        let action: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(action, json!({"index": {"_index": "land_deeds", "_id": "B-1"}}));

        let source: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(source["grantors"], "John Penn");
        assert_eq!(source["execution_date"], "1755-03-03");

        let source: Value = serde_json::from_str(lines[3]).unwrap();
        assert_eq!(source["recording_date"], Value::Null);
    }

    #[test]
    fn test_index_path_is_encoded() {
        assert_eq!(ElasticClient::index_path("land deeds"), "/land%20deeds");
    }
}
