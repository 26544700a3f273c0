//! Deed Archive - extraction, indexing and search for scanned colonial land deeds.
//!
//! Handwritten deed scans are transcribed into structured records by a vision
//! model, reviewed records are bulk-loaded from CSV into Elasticsearch, and the
//! index is searched from the command line or through an MCP server. Two
//! transcripts of the same deed can be compared word by word.
//!
//! # Architecture
//!
//! - **domain**: `DocumentId` and `DeedDate` value objects
//! - **models**: extraction schema, CSV/index records, search query and response types
//! - **error**: error enums per pipeline stage
//! - **config**: configuration from environment variables
//! - **client**: Anthropic and Elasticsearch HTTP clients
//! - **extraction**: prompt, image preparation and response parsing
//! - **repositories**: extractor and index traits, file-backed extraction store
//! - **search**: query builder and hit rendering
//! - **matching**: transcript comparison
//! - **services**: indexer and search services
//! - **metrics**: in-process counters
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod extraction;
pub mod matching;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;

pub use client::{AnthropicClient, ElasticClient};
pub use config::Config;
pub use domain::{DeedDate, DocumentId, ValidationError};
pub use error::{ApiError, ConfigError, ExtractionError, IndexError, SearchError, StoreError};
pub use extraction::{parse_response, DeedAnalyzer};
pub use matching::{compare_transcripts, ComparisonResult};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{ExtractedDeed, ExtractionOutcome, IndexedDeed, MatchMode, QuerySpec, SearchField};
pub use repositories::{DeedExtractor, ExtractionStore, ProcessOutcome, SearchIndex};
pub use search::build_query;
pub use server::DeedArchiveServer;
pub use services::{IndexerService, SearchParams, SearchService, SearchServiceImpl};
