//! Indexer service: loads the reviewed deed CSV into the search index.

use crate::error::IndexResult;
use crate::metrics::Metrics;
use crate::models::{BulkSummary, DeedRow, IndexedDeed};
use crate::repositories::SearchIndex;
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Documents sent per `_bulk` request.
pub const BULK_BATCH_SIZE: usize = 500;

/// Settings and field mappings used when the deed index is first created.
///
/// Never applied to an index that already exists.
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "document_id": { "type": "keyword" },
                "document_text": { "type": "text" },
                "document_type": { "type": "keyword" },
                "grantors": { "type": "text" },
                "grantees": { "type": "text" },
                "legal_authorities": { "type": "text" },
                "acreage": { "type": "text" },
                "boundaries": { "type": "text" },
                "lot_info": { "type": "text" },
                "city": { "type": "text" },
                "county": { "type": "text" },
                "province_colony": { "type": "text" },
                "execution_date": { "type": "date", "format": "yyyy-MM-dd" },
                "recording_date": { "type": "date", "format": "yyyy-MM-dd" }
            }
        }
    })
}

/// Read deed rows from CSV data with a header line.
pub fn read_rows<R: Read>(reader: R) -> IndexResult<Vec<DeedRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<DeedRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Loads deed rows into a named index.
pub struct IndexerService {
    index: Arc<dyn SearchIndex>,
    index_name: String,
    metrics: Metrics,
}

impl IndexerService {
    pub fn new(index: Arc<dyn SearchIndex>, index_name: impl Into<String>, metrics: Metrics) -> Self {
        Self {
            index,
            index_name: index_name.into(),
            metrics,
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Log whether the cluster answers. A failed ping does not stop the load.
    pub fn check_connection(&self) -> bool {
        let connected = self.index.ping();
        if connected {
            tracing::info!("Connected to Elasticsearch");
        } else {
            tracing::error!("Could not connect to Elasticsearch");
        }
        connected
    }

    /// Create the index with [`index_mapping`] unless it already exists.
    ///
    /// Returns `true` when the index was created by this call.
    pub fn ensure_index(&self) -> IndexResult<bool> {
        if self.index.index_exists(&self.index_name)? {
            tracing::info!("Index '{}' already exists.", self.index_name);
            return Ok(false);
        }

        self.index.create_index(&self.index_name, &index_mapping())?;
        tracing::info!("Index '{}' created successfully.", self.index_name);
        Ok(true)
    }

    /// Normalize rows and store them keyed by document id, in batches of
    /// [`BULK_BATCH_SIZE`].
    ///
    /// A transport failure stops the load; batches already sent stay indexed.
    pub fn load_rows(&self, rows: Vec<DeedRow>) -> IndexResult<BulkSummary> {
        let deeds: Vec<IndexedDeed> = rows.into_iter().map(IndexedDeed::from).collect();
        tracing::debug!("Indexing {} documents into '{}'", deeds.len(), self.index_name);

        let mut summary = BulkSummary::default();
        for batch in deeds.chunks(BULK_BATCH_SIZE) {
            let batch_summary = self.index.bulk_index(&self.index_name, batch)?;
            self.metrics.record_indexed(batch_summary.indexed);
            summary.merge(batch_summary);
        }

        for error in &summary.errors {
            tracing::warn!("Failed to index {}", error);
        }
        tracing::info!(
            "Indexed {} documents ({} failed)",
            summary.indexed,
            summary.failed
        );
        Ok(summary)
    }

    /// Full load from a CSV file: ping, ensure the index, bulk load.
    pub fn load_csv(&self, csv_path: &Path) -> IndexResult<BulkSummary> {
        let rows = read_rows(std::fs::File::open(csv_path).map_err(csv::Error::from)?)?;
        tracing::info!("Read {} rows from {}", rows.len(), csv_path.display());

        self.check_connection();
        self.ensure_index()?;
        self.load_rows(rows)
    }
}
