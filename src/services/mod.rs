//! Application service layer.
//!
//! Services hold the pipeline logic between the CLI / MCP handlers and the
//! search index.

mod indexer_service;
mod search_service;

pub use indexer_service::{index_mapping, read_rows, IndexerService, BULK_BATCH_SIZE};
pub use search_service::{SearchParams, SearchService, SearchServiceImpl};
