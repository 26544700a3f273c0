//! Tests for the search service and MCP server wiring over a mock index.

mod mocks;

use deed_archive::client::{AsyncSearchClient, AsyncSearchClientImpl};
use deed_archive::error::SearchError;
use deed_archive::models::DeedHit;
use deed_archive::search::render_hits;
use deed_archive::{
    DeedArchiveServer, ExtractionStore, Metrics, SearchIndex, SearchParams, SearchService,
    SearchServiceImpl,
};
use mocks::MockSearchIndex;
use rmcp::ServerHandler;
use serde_json::{json, Map, Value};
use std::path::Path;
use std::sync::Arc;

fn hit(id: &str, source: Value) -> DeedHit {
    let source: Map<String, Value> = serde_json::from_value(source).unwrap();
    DeedHit {
        id: id.to_string(),
        score: Some(1.0),
        source,
    }
}

fn service(index: &MockSearchIndex, max_hits: usize) -> Arc<dyn SearchService> {
    let index = Arc::new(index.clone()) as Arc<dyn SearchIndex>;
    let client = Arc::new(AsyncSearchClientImpl::new(index)) as Arc<dyn AsyncSearchClient>;
    Arc::new(SearchServiceImpl::new(client, "land_deeds", max_hits))
}

#[tokio::test]
async fn test_search_params_reach_the_index() {
    let index = MockSearchIndex::new();
    index.set_hits(vec![hit(
        "B-12",
        json!({"document_id": "B-12", "grantors": "Thomas Penn", "city": "Philadelphia"}),
    )]);

    let params = SearchParams {
        term: Some("Pen".to_string()),
        field: Some("Grantors".to_string()),
        mode: Some("fuzzy".to_string()),
        start_date: Some("1750-01-01".to_string()),
        end_date: Some("1760-12-31".to_string()),
    };
    let hits = service(&index, 10000).search_params(&params).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(index.get_call_count("search"), 1);
    assert_eq!(
        index.queries()[0],
        json!({
            "query": {
                "bool": {
                    "must": [
                        {"fuzzy": {"grantors": {"value": "Pen", "fuzziness": "AUTO"}}},
                        {"range": {"execution_date": {"gte": "1750-01-01", "lte": "1760-12-31"}}}
                    ]
                }
            }
        })
    );

    let rendered = render_hits(&hits, Path::new("1"));
    assert!(rendered.starts_with("1 Results Found:\n"));
    assert!(rendered.contains("Image: 1/B-12.TIF"));
    assert!(rendered.contains("Grantees: N/A"));
}

#[tokio::test]
async fn test_hit_limit_is_passed_as_size() {
    let index = MockSearchIndex::new();
    index.set_hits(vec![
        hit("B-1", json!({})),
        hit("B-2", json!({})),
        hit("B-3", json!({})),
    ]);

    let hits = service(&index, 2)
        .search_params(&SearchParams::default())
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(index.queries()[0], json!({"query": {"match_all": {}}}));
}

#[tokio::test]
async fn test_invalid_parameters_never_reach_the_index() {
    let index = MockSearchIndex::new();
    let params = SearchParams {
        mode: Some("phonetic".to_string()),
        ..Default::default()
    };

    let result = service(&index, 10).search_params(&params).await;

    assert!(matches!(result, Err(SearchError::InvalidParameters(_))));
    assert_eq!(index.get_call_count("search"), 0);
}

#[tokio::test]
async fn test_unreachable_index_is_api_error() {
    let index = MockSearchIndex::unreachable();
    let result = service(&index, 10)
        .search_params(&SearchParams::default())
        .await;

    assert!(matches!(result, Err(SearchError::Api(_))));
}

#[test]
fn test_server_info() {
    let index = MockSearchIndex::new();
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(ExtractionStore::new(dir.path(), Metrics::new()));
    let server = DeedArchiveServer::new(service(&index, 10), store, "1");

    let info = server.get_info();
    assert_eq!(info.server_info.name, "deed-archive");
    assert!(info.capabilities.tools.is_some());
}
