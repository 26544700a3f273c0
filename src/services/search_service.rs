//! Search service layer.
//!
//! Validates raw search parameters and runs the built query against the index.

use crate::client::AsyncSearchClient;
use crate::domain::DeedDate;
use crate::error::{SearchError, SearchResult};
use crate::models::{DeedHit, MatchMode, QuerySpec, SearchField};
use crate::search::build_query;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

/// Raw search parameters as entered by a user.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search term; empty or absent matches every document
    #[serde(default)]
    pub term: Option<String>,
    /// Field label or index field name (default "Full Text")
    #[serde(default)]
    pub field: Option<String>,
    /// "exact" (default) or "fuzzy"
    #[serde(default)]
    pub mode: Option<String>,
    /// Earliest date, YYYY-MM-DD
    #[serde(default)]
    pub start_date: Option<String>,
    /// Latest date, YYYY-MM-DD
    #[serde(default)]
    pub end_date: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(value: &Option<String>) -> SearchResult<Option<DeedDate>> {
    non_blank(value)
        .map(DeedDate::parse_iso)
        .transpose()
        .map_err(|e| SearchError::InvalidParameters(e.to_string()))
}

impl SearchParams {
    /// Validate the parameters into a [`QuerySpec`].
    pub fn to_query_spec(&self) -> SearchResult<QuerySpec> {
        let field = non_blank(&self.field)
            .map(str::parse::<SearchField>)
            .transpose()
            .map_err(SearchError::InvalidParameters)?
            .unwrap_or_default();
        let mode = non_blank(&self.mode)
            .map(str::parse::<MatchMode>)
            .transpose()
            .map_err(SearchError::InvalidParameters)?
            .unwrap_or_default();

        let start_date = parse_date(&self.start_date)?;
        let end_date = parse_date(&self.end_date)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(SearchError::InvalidParameters(format!(
                    "start date {} is after end date {}",
                    start, end
                )));
            }
        }

        let term = self.term.clone().unwrap_or_default();
        Ok(QuerySpec::new(term, field, mode).with_dates(start_date, end_date))
    }
}

/// Search service trait for deed lookups.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Run a validated query and return its hits.
    async fn search(&self, spec: &QuerySpec) -> SearchResult<Vec<DeedHit>>;

    /// Validate raw parameters, then search.
    async fn search_params(&self, params: &SearchParams) -> SearchResult<Vec<DeedHit>> {
        let spec = params.to_query_spec()?;
        self.search(&spec).await
    }
}

/// Default implementation of SearchService.
pub struct SearchServiceImpl {
    client: Arc<dyn AsyncSearchClient>,
    index_name: String,
    max_hits: usize,
}

impl SearchServiceImpl {
    pub fn new(client: Arc<dyn AsyncSearchClient>, index_name: impl Into<String>, max_hits: usize) -> Self {
        Self {
            client,
            index_name: index_name.into(),
            max_hits,
        }
    }
}

#[async_trait]
impl SearchService for SearchServiceImpl {
    async fn search(&self, spec: &QuerySpec) -> SearchResult<Vec<DeedHit>> {
        let body = build_query(spec);
        tracing::debug!("Search on '{}': {}", self.index_name, body);

        let hits = self
            .client
            .search(&self.index_name, body, self.max_hits)
            .await?;
        tracing::info!("{} hits for '{}' in {}", hits.len(), spec.term, spec.field);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiResult;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        calls: Mutex<Vec<(String, Value, usize)>>,
    }

    #[async_trait]
    impl AsyncSearchClient for RecordingClient {
        async fn search(&self, index: &str, body: Value, size: usize) -> ApiResult<Vec<DeedHit>> {
            self.calls
                .lock()
                .unwrap()
                .push((index.to_string(), body, size));
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_defaults() {
        let spec = SearchParams::default().to_query_spec().unwrap();
        assert_eq!(spec, QuerySpec::default());
    }

    #[test]
    fn test_parses_labels_and_dates() {
        let params = SearchParams {
            term: Some("Penn".to_string()),
            field: Some("grantors".to_string()),
            mode: Some("Fuzzy".to_string()),
            start_date: Some("1750-01-01".to_string()),
            end_date: Some(" ".to_string()),
        };

        let spec = params.to_query_spec().unwrap();
        assert_eq!(spec.field, SearchField::Grantors);
        assert_eq!(spec.mode, MatchMode::Fuzzy);
        assert_eq!(spec.start_date.unwrap().to_string(), "1750-01-01");
        assert_eq!(spec.end_date, None);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let bad_field = SearchParams {
            field: Some("Witnesses".to_string()),
            ..Default::default()
        };
        let bad_date = SearchParams {
            start_date: Some("March 3, 1755".to_string()),
            ..Default::default()
        };
        let reversed = SearchParams {
            start_date: Some("1760-01-01".to_string()),
            end_date: Some("1750-01-01".to_string()),
            ..Default::default()
        };

        for params in [bad_field, bad_date, reversed] {
            assert!(matches!(
                params.to_query_spec(),
                Err(SearchError::InvalidParameters(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_search_sends_built_query() {
        let client = Arc::new(RecordingClient::default());
        let service = SearchServiceImpl::new(client.clone(), "land_deeds", 10000);

        let params = SearchParams {
            term: Some("Allen".to_string()),
            ..Default::default()
        };
        service.search_params(&params).await.unwrap();

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "land_deeds");
        assert_eq!(calls[0].1, json!({"query": {"match": {"document_text": "Allen"}}}));
        assert_eq!(calls[0].2, 10000);
    }
}
