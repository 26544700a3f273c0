//! Translates a [`QuerySpec`] into an Elasticsearch query body.

use crate::domain::DeedDate;
use crate::models::{MatchMode, QuerySpec, SearchField};
use serde_json::{json, Value};

/// Build the `{"query": ...}` body for a search.
///
/// - Empty term: `match_all`, whatever the mode.
/// - Exact: `match` on the selected field.
/// - Fuzzy: `fuzzy` on the selected field with `AUTO` edit distance.
///
/// When either date bound is set, the term query and a `range` clause are
/// combined under `bool.must`. A missing bound falls back to the edge of the
/// deed date window.
pub fn build_query(spec: &QuerySpec) -> Value {
    let term = spec.term.trim();
    let field = spec.field.index_field();

    let base = if term.is_empty() {
        json!({ "match_all": {} })
    } else {
        match spec.mode {
            MatchMode::Exact => json!({ "match": { field: term } }),
            MatchMode::Fuzzy => json!({
                "fuzzy": { field: { "value": term, "fuzziness": "AUTO" } }
            }),
        }
    };

    let query = if spec.has_date_filter() {
        json!({
            "bool": {
                "must": [base, date_range(spec)]
            }
        })
    } else {
        base
    };

    json!({ "query": query })
}

/// The index field a date range applies to for the selected search field.
pub fn date_filter_field(field: SearchField) -> &'static str {
    if field.is_date() {
        field.index_field()
    } else {
        SearchField::ExecutionDate.index_field()
    }
}

fn date_range(spec: &QuerySpec) -> Value {
    let start = spec.start_date.unwrap_or_else(DeedDate::window_start);
    let end = spec.end_date.unwrap_or_else(DeedDate::window_end);

    json!({
        "range": {
            date_filter_field(spec.field): {
                "gte": start.to_string(),
                "lte": end.to_string(),
            }
        }
    })
}
