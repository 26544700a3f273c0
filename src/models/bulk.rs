//! Outcome of a bulk load request.

use serde::Deserialize;

/// How many documents a bulk request stored and which ones it rejected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkSummary {
    pub indexed: usize,
    pub failed: usize,
    /// One `"<id>: <reason>"` line per rejected document
    pub errors: Vec<String>,
}

impl BulkSummary {
    /// Fold another batch into this summary.
    pub fn merge(&mut self, other: BulkSummary) {
        self.indexed += other.indexed;
        self.failed += other.failed;
        self.errors.extend(other.errors);
    }
}

/// `_bulk` response body.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BulkResponseBody {
    #[serde(default)]
    pub errors: bool,

    #[serde(default)]
    pub items: Vec<BulkItem>,
}

/// One entry of `items`, keyed by the action name.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkItem {
    #[serde(alias = "create", alias = "update")]
    pub index: BulkItemResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkItemResult {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub status: u16,

    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl From<BulkResponseBody> for BulkSummary {
    fn from(body: BulkResponseBody) -> Self {
        let mut summary = BulkSummary::default();
        for item in body.items {
            let result = item.index;
            match result.error {
                Some(error) => {
                    let reason = error
                        .get("reason")
                        .and_then(|r| r.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| error.to_string());
                    summary.failed += 1;
                    summary.errors.push(format!("{}: {}", result.id, reason));
                }
                _ if result.status >= 300 => {
                    summary.failed += 1;
                    summary
                        .errors
                        .push(format!("{}: status {}", result.id, result.status));
                }
                _ => summary.indexed += 1,
            }
        }
        summary
    }
}
