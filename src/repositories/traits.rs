use crate::error::{ApiResult, ExtractionResult};
use crate::models::{BulkSummary, DeedHit, ExtractionOutcome, IndexedDeed};
use serde_json::Value;
use std::path::Path;

/// Turns one deed image into an extraction result.
///
/// Implemented by [`DeedAnalyzer`](crate::extraction::DeedAnalyzer) against the
/// model API; tests substitute a scripted fake.
pub trait DeedExtractor: Send + Sync {
    /// Extract structured fields from the image at `image_path`.
    ///
    /// An unparseable reply is returned as `Ok(ExtractionOutcome::Failed { .. })`.
    /// `Err` is reserved for failures reaching the model or reading the image.
    fn extract_components(&self, image_path: &Path) -> ExtractionResult<ExtractionOutcome>;
}

/// Operations the pipeline needs from the search cluster.
///
/// Provides abstraction over the cluster so the indexer and the search surface
/// can run against a mock.
pub trait SearchIndex: Send + Sync {
    /// Check connectivity. Never fails; `false` means unreachable or unauthorized.
    fn ping(&self) -> bool;

    /// Whether the named index exists.
    fn index_exists(&self, index: &str) -> ApiResult<bool>;

    /// Create the named index with the given settings/mappings body.
    fn create_index(&self, index: &str, body: &Value) -> ApiResult<()>;

    /// Store documents keyed by their document id, overwriting existing ones.
    fn bulk_index(&self, index: &str, deeds: &[IndexedDeed]) -> ApiResult<BulkSummary>;

    /// Run a query body and return up to `size` hits.
    fn search(&self, index: &str, body: &Value, size: usize) -> ApiResult<Vec<DeedHit>>;
}
