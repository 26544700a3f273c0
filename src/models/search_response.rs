//! Search response as returned by the `_search` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level `_search` response body.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchResponseBody {
    #[serde(default)]
    pub hits: HitsEnvelope,
}

/// The `hits` object of a search response.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub hits: Vec<DeedHit>,
}

/// One matching deed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DeedHit {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(rename = "_score", default)]
    pub score: Option<f64>,

    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

impl DeedHit {
    /// The stored document id, falling back to the index `_id`.
    pub fn document_id(&self) -> &str {
        self.source
            .get("document_id")
            .and_then(Value::as_str)
            .unwrap_or(&self.id)
    }

    /// A stored field rendered as text; `None` when absent, null or blank.
    pub fn field(&self, name: &str) -> Option<String> {
        match self.source.get(name)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_search_response() {
        let body: SearchResponseBody = serde_json::from_value(json!({
            "took": 3,
            "hits": {
                "total": {"value": 1, "relation": "eq"},
                "hits": [{
                    "_index": "land_deeds",
                    "_id": "B-12",
                    "_score": 1.5,
                    "_source": {"document_id": "B-12", "grantors": "William Allen", "execution_date": null}
                }]
            }
        }))
        .unwrap();

        let hit = &body.hits.hits[0];
        assert_eq!(hit.document_id(), "B-12");
        assert_eq!(hit.field("grantors").as_deref(), Some("William Allen"));
        assert_eq!(hit.field("execution_date"), None);
        assert_eq!(hit.field("city"), None);
    }

    #[test]
    fn test_document_id_falls_back_to_index_id() {
        let hit = DeedHit {
            id: "B-99".to_string(),
            ..Default::default()
        };
        assert_eq!(hit.document_id(), "B-99");
    }
}
