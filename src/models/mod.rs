//! Data models for deeds at each stage of the pipeline.
//!
//! This module contains the nested extraction schema produced by the model,
//! the flat record loaded into the index, the search query specification and
//! the search response types.

pub mod bulk;
pub mod extraction;
pub mod query;
pub mod record;
pub mod search_response;

pub use bulk::{BulkItem, BulkItemResult, BulkResponseBody, BulkSummary};
pub use extraction::{
    ExtractedDeed, ExtractionOutcome, GeographicalReferences, PropertyDescription,
    TransactionDates, PARSE_FAILURE_MESSAGE,
};
pub use query::{MatchMode, QuerySpec, SearchField};
pub use record::{DeedRow, IndexedDeed};
pub use search_response::{DeedHit, HitsEnvelope, SearchResponseBody};
